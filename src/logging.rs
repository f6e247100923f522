// Diagnostic logging on stderr; stdout carries the report

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = match *event.metadata().level() {
            tracing::Level::TRACE => "TRACE",
            tracing::Level::DEBUG => "DEBUG",
            tracing::Level::INFO => "INFO",
            tracing::Level::WARN => "WARN",
            tracing::Level::ERROR => "ERROR",
        };
        let timestamp = Local::now().format("%H:%M:%S");

        write!(writer, "{} [{}]: ", level, timestamp)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter directive for the given verbosity
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "gotest_report=debug,warn"
    } else {
        "gotest_report=warn"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    // A subscriber may already be installed (tests calling in twice)
    let _ = tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "gotest_report=warn");
        assert!(default_filter(true).starts_with("gotest_report=debug"));
    }
}
