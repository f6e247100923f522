// Report module - classification markers and console rendering

pub mod console;

pub use console::ConsoleReporter;

use crate::state::Outcome;
use ::console::Style;

/// Marker contained in failure lines that point at a source location
pub const DEFAULT_FAILED_MARKER: &str = ".go";
pub const DEFAULT_PASSED_MARKER: &str = "--- PASS";
pub const DEFAULT_SKIPPED_MARKER: &str = "--- SKIP";

/// Default width of the separator rule around section titles
pub const DEFAULT_SEPARATOR_WIDTH: usize = 120;

/// Which categories a report includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Only the failed section
    #[default]
    FailuresOnly,
    /// Failed, skipped and passed sections
    All,
}

/// Whether to emit terminal styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Style only when the terminal supports it
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "unknown color mode '{}' (expected auto, always or never)",
                other
            )),
        }
    }
}

impl ColorMode {
    /// Apply the mode to a style
    pub fn apply(self, style: Style) -> Style {
        match self {
            Self::Auto => style,
            Self::Always => style.force_styling(true),
            Self::Never => style.force_styling(false),
        }
    }
}

/// A rendered report section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Failed,
    Skipped,
    Passed,
    Incomplete,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
            Self::Passed => "Passed",
            Self::Incomplete => "Incomplete",
        }
    }

    pub fn style(self) -> Style {
        match self {
            Self::Failed => Style::new().red(),
            Self::Skipped => Style::new().blue(),
            Self::Passed => Style::new().green(),
            Self::Incomplete => Style::new().yellow(),
        }
    }

    /// Mapping backing the section; incomplete tests have none
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Failed => Some(Outcome::Fail),
            Self::Skipped => Some(Outcome::Skip),
            Self::Passed => Some(Outcome::Pass),
            Self::Incomplete => None,
        }
    }
}

/// Substrings selecting which captured lines each section shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub failed: String,
    pub passed: String,
    pub skipped: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            failed: DEFAULT_FAILED_MARKER.to_string(),
            passed: DEFAULT_PASSED_MARKER.to_string(),
            skipped: DEFAULT_SKIPPED_MARKER.to_string(),
        }
    }
}

impl Markers {
    pub fn for_outcome(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Fail => &self.failed,
            Outcome::Pass => &self.passed,
            Outcome::Skip => &self.skipped,
        }
    }
}
