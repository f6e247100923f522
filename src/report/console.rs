// Console reporter - sectioned, color-coded test report

use std::io::{self, Write};

use super::{Category, ColorMode, DEFAULT_SEPARATOR_WIDTH, DisplayMode, Markers};
use crate::state::TestOutcomes;

/// Console reporter
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    display: DisplayMode,
    color: ColorMode,
    markers: Markers,
    separator_width: usize,
    summary: bool,
}

impl ConsoleReporter {
    /// Create new console reporter with default markers and separator
    pub fn new(display: DisplayMode, color: ColorMode) -> Self {
        Self {
            display,
            color,
            markers: Markers::default(),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            summary: false,
        }
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Append a one-line count of every category
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Sections rendered for these outcomes, in output order
    pub fn sections(&self, outcomes: &TestOutcomes) -> Vec<Category> {
        let mut sections = vec![Category::Failed];
        if self.display == DisplayMode::All {
            sections.push(Category::Skipped);
            sections.push(Category::Passed);
            if !outcomes.incomplete().is_empty() {
                sections.push(Category::Incomplete);
            }
        }
        sections
    }

    /// Render the report
    pub fn render(&self, outcomes: &TestOutcomes, out: &mut dyn Write) -> io::Result<()> {
        for category in self.sections(outcomes) {
            self.write_header(category, out)?;
            self.write_entries(category, outcomes, out)?;
        }

        if self.summary {
            self.write_summary(outcomes, out)?;
        }

        out.flush()
    }

    /// Render the report into a string
    pub fn render_to_string(&self, outcomes: &TestOutcomes) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.render(outcomes, &mut buffer)
            .expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn write_header(&self, category: Category, out: &mut dyn Write) -> io::Result<()> {
        let style = self.color.apply(category.style());
        let separator = "-".repeat(self.separator_width);

        writeln!(out, "{}", style.apply_to(&separator))?;
        writeln!(out, "{}", style.apply_to(category.title()))?;
        writeln!(out, "{}", style.apply_to(&separator))
    }

    fn write_entries(
        &self,
        category: Category,
        outcomes: &TestOutcomes,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let style = self.color.apply(category.style());

        let Some(outcome) = category.outcome() else {
            for id in outcomes.incomplete() {
                writeln!(out, "{}", style.apply_to(id))?;
            }
            return Ok(());
        };

        let marker = self.markers.for_outcome(outcome);
        for group in outcomes.sorted(outcome) {
            for (event, text) in group.matching_lines(marker) {
                let line = format!("{}:{} {}", event.package, group.id.name, text);
                writeln!(out, "{}", style.apply_to(line))?;
            }
        }

        Ok(())
    }

    fn write_summary(&self, outcomes: &TestOutcomes, out: &mut dyn Write) -> io::Result<()> {
        let failed = outcomes.failed().len();
        let style = if failed > 0 {
            Category::Failed.style()
        } else {
            Category::Passed.style()
        };

        let mut line = format!(
            "{} failed, {} skipped, {} passed",
            failed,
            outcomes.skipped().len(),
            outcomes.passed().len()
        );
        if !outcomes.incomplete().is_empty() {
            line.push_str(&format!(", {} incomplete", outcomes.incomplete().len()));
        }

        writeln!(out, "{}", self.color.apply(style).apply_to(line))
    }
}
