// CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::grouping::AttributionMode;
use crate::report::{ColorMode, DisplayMode};

/// Readable, color-coded reports from `go test -json` output
#[derive(Parser, Debug)]
#[command(name = "gotest-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize `go test -json` event streams", long_about = None)]
pub struct Cli {
    /// File containing the output of `go test -json` (default: stdin)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Echo the raw output of Go tests to stdout while reading
    #[arg(short = 'v', long, default_value_t = false)]
    pub echo: bool,

    /// Report failed, skipped and passed tests (default: failures only)
    #[arg(short = 'a', long, default_value_t = false)]
    pub all: bool,

    /// Force colored output, for CI logs that are not a terminal
    #[arg(long, default_value_t = false, conflicts_with = "no_color")]
    pub ci: bool,

    /// Disable colored output
    #[arg(short = 'c', long, default_value_t = false)]
    pub no_color: bool,

    /// Attribute output to the most recently started test or to the test named in each event
    #[arg(long, value_name = "MODE", value_parser = ["current", "own"])]
    pub attribution: Option<String>,

    /// Print a line with failed/skipped/passed counts after the report
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

impl Cli {
    /// Get display mode; the flag wins over the config file
    pub fn display_mode(&self, config: &Config) -> DisplayMode {
        if self.all || config.report.all {
            DisplayMode::All
        } else {
            DisplayMode::FailuresOnly
        }
    }

    /// Get color mode
    pub fn color_mode(&self, config: &Config) -> ColorMode {
        if self.ci {
            ColorMode::Always
        } else if self.no_color {
            ColorMode::Never
        } else {
            config.color_mode()
        }
    }

    /// Get attribution mode
    pub fn attribution_mode(&self, config: &Config) -> AttributionMode {
        match &self.attribution {
            Some(mode) => mode.parse().unwrap_or_default(),
            None => config.attribution_mode(),
        }
    }

    pub fn echo_enabled(&self, config: &Config) -> bool {
        self.echo || config.report.echo
    }

    pub fn summary_enabled(&self, config: &Config) -> bool {
        self.summary || config.report.summary
    }
}
