pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod grouping;
pub mod logging;
pub mod report;
pub mod source;
pub mod state;

pub use error::ReportError;
pub use event::{Action, Event, TestId, decode_line};
pub use grouping::{AttributionMode, GroupingEngine, group_events};
pub use report::{ColorMode, ConsoleReporter, DisplayMode};
pub use state::{Outcome, TestGroup, TestOutcomes};
