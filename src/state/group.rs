// Captured output of one test cycle

use crate::event::{Event, TestId};

/// Captured events of a test's most recent run→terminal cycle
#[derive(Debug, Clone, PartialEq)]
pub struct TestGroup {
    pub id: TestId,
    /// Captured `output` events, in stream order
    pub events: Vec<Event>,
    /// `Elapsed` of the terminal event, seconds
    pub elapsed: Option<f64>,
    /// Position at which the entry was recorded; sort key for rendering
    pub ordinal: usize,
}

impl TestGroup {
    pub fn new(id: TestId, events: Vec<Event>, elapsed: Option<f64>, ordinal: usize) -> Self {
        Self {
            id,
            events,
            elapsed,
            ordinal,
        }
    }

    /// Trimmed output lines containing `marker`, in capture order
    pub fn matching_lines<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = (&'a Event, &'a str)> {
        self.events.iter().filter_map(move |event| {
            event
                .trimmed_output()
                .filter(|text| text.contains(marker))
                .map(|text| (event, text))
        })
    }
}
