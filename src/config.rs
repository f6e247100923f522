// Configuration file handling

use crate::grouping::AttributionMode;
use crate::report::{self, ColorMode, Markers};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub grouping: GroupingConfig,

    #[serde(default)]
    pub markers: MarkersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report failed, skipped and passed tests instead of failures only
    #[serde(default)]
    pub all: bool,

    /// Echo raw test output while reading events
    #[serde(default)]
    pub echo: bool,

    /// Styling mode (auto, always, never)
    #[serde(default = "default_color")]
    pub color: String,

    /// Width of the section separator rule
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,

    /// Print a counts line after the report
    #[serde(default)]
    pub summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            all: false,
            echo: false,
            color: default_color(),
            separator_width: default_separator_width(),
            summary: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Output attribution (current, own)
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            attribution: default_attribution(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_failed_marker")]
    pub failed: String,

    #[serde(default = "default_passed_marker")]
    pub passed: String,

    #[serde(default = "default_skipped_marker")]
    pub skipped: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            failed: default_failed_marker(),
            passed: default_passed_marker(),
            skipped: default_skipped_marker(),
        }
    }
}

impl From<&MarkersConfig> for Markers {
    fn from(config: &MarkersConfig) -> Self {
        Markers {
            failed: config.failed.clone(),
            passed: config.passed.clone(),
            skipped: config.skipped.clone(),
        }
    }
}

// Default values
pub const CONFIG_FILE_NAME: &str = ".gotestreportrc";

fn default_color() -> String {
    String::from("auto")
}

pub fn default_separator_width() -> usize {
    report::DEFAULT_SEPARATOR_WIDTH
}

fn default_attribution() -> String {
    String::from("current")
}

fn default_failed_marker() -> String {
    report::DEFAULT_FAILED_MARKER.to_string()
}

fn default_passed_marker() -> String {
    report::DEFAULT_PASSED_MARKER.to_string()
}

fn default_skipped_marker() -> String {
    report::DEFAULT_SKIPPED_MARKER.to_string()
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .gotestreportrc (current directory)
        // 2. ~/.gotestreportrc (home directory)
        // 3. .gotestreportrc.toml (current directory)
        // 4. ~/.gotestreportrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;
        let toml_name = format!("{}.toml", CONFIG_FILE_NAME);

        let paths = [
            cwd.join(CONFIG_FILE_NAME),
            home.join(CONFIG_FILE_NAME),
            cwd.join(&toml_name),
            home.join(&toml_name),
        ];

        for path in &paths {
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let config = Self::parse(&content);
        if config.is_none() {
            warn!("Ignoring invalid configuration file {}", path.display());
        }
        config
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Configured color mode; unknown values fall back to auto
    pub fn color_mode(&self) -> ColorMode {
        self.report.color.parse().unwrap_or_else(|err: String| {
            warn!("{}", err);
            ColorMode::Auto
        })
    }

    /// Configured attribution mode; unknown values fall back to current
    pub fn attribution_mode(&self) -> AttributionMode {
        self.grouping.attribution.parse().unwrap_or_else(|err: String| {
            warn!("{}", err);
            AttributionMode::Current
        })
    }
}
