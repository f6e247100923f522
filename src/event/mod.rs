// Event module - test2json event records

pub mod decoder;

pub use decoder::{DecodeError, decode_line, decode_slice};

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fmt;

/// Lifecycle step reported by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Run,
    Pause,
    Cont,
    Output,
    Pass,
    Fail,
    Skip,
    Bench,
    /// Any action this tool does not know about yet
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Whether this action ends a test's run→terminal cycle
    pub fn is_terminal(self) -> bool {
        matches!(self, Action::Pass | Action::Fail | Action::Skip)
    }
}

/// One decoded record from the event stream
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Informational; stream order is authoritative
    #[serde(default)]
    pub time: Option<DateTime<FixedOffset>>,
    pub action: Action,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub elapsed: Option<f64>,
    #[serde(default)]
    pub output: Option<String>,
}

impl Event {
    /// Create an event with only an action and package set
    pub fn new(action: Action, package: impl Into<String>) -> Self {
        Self {
            time: None,
            action,
            package: package.into(),
            test: None,
            elapsed: None,
            output: None,
        }
    }

    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    /// Identity of the test this event belongs to, if it is test-scoped
    pub fn test_id(&self) -> Option<TestId> {
        self.test
            .as_ref()
            .map(|name| TestId::new(self.package.clone(), name.clone()))
    }

    /// Output text with surrounding whitespace removed
    pub fn trimmed_output(&self) -> Option<&str> {
        self.output.as_deref().map(str::trim)
    }
}

/// Test identity: a test name within its owning package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestId {
    pub package: String,
    pub name: String,
}

impl TestId {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package, self.name)
    }
}
