// Report command - read events, group them, render the report

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ReportError;
use crate::event::Event;
use crate::grouping::{AttributionMode, GroupingEngine};
use crate::report::{ConsoleReporter, Markers};
use crate::source::{EventReader, EventSource};
use crate::state::TestOutcomes;

/// Everything a report run needs, resolved from flags and config
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub source: EventSource,
    pub attribution: AttributionMode,
    pub echo: bool,
    pub reporter: ConsoleReporter,
}

impl ReportOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let reporter = ConsoleReporter::new(cli.display_mode(config), cli.color_mode(config))
            .with_markers(Markers::from(&config.markers))
            .with_separator_width(config.report.separator_width)
            .with_summary(cli.summary_enabled(config));

        Self {
            source: EventSource::from_path(cli.file.as_deref()),
            attribution: cli.attribution_mode(config),
            echo: cli.echo_enabled(config),
            reporter,
        }
    }
}

/// Fold a stream of decoded events, stopping at the first error
pub fn fold_events<I>(
    events: I,
    mode: AttributionMode,
    echo: Option<&mut dyn Write>,
) -> Result<TestOutcomes, ReportError>
where
    I: IntoIterator<Item = Result<Event, ReportError>>,
{
    let mut engine = GroupingEngine::new(mode);
    if let Some(sink) = echo {
        engine = engine.with_echo(sink);
    }

    let mut count = 0usize;
    for event in events {
        engine.observe(&event?).map_err(ReportError::Write)?;
        count += 1;
    }

    debug!("Grouped {} event(s)", count);
    Ok(engine.finish())
}

/// Group the events of `reader` and write echo and report to `out`.
///
/// Nothing is rendered when the stream fails to read or decode.
pub fn write_report<R: BufRead>(
    options: &ReportOptions,
    reader: EventReader<R>,
    out: &mut dyn Write,
) -> Result<TestOutcomes, ReportError> {
    let outcomes = if options.echo {
        // Reborrow with a shortened object lifetime so `out` is usable again below
        let sink: &mut dyn Write = &mut *out;
        fold_events(reader, options.attribution, Some(sink))?
    } else {
        fold_events(reader, options.attribution, None)?
    };

    info!(
        "{} failed, {} skipped, {} passed, {} incomplete",
        outcomes.failed().len(),
        outcomes.skipped().len(),
        outcomes.passed().len(),
        outcomes.incomplete().len()
    );

    options
        .reporter
        .render(&outcomes, out)
        .map_err(ReportError::Write)?;
    Ok(outcomes)
}

/// Run a report against the configured source, writing to stdout
pub fn run_report(cli: &Cli, config: &Config) -> Result<()> {
    let options = ReportOptions::resolve(cli, config);
    debug!("Report options: {:?}", options);

    let reader = options.source.open()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    write_report(&options, reader, &mut out)?;
    Ok(())
}
