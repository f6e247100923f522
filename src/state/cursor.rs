// Mutable grouping state owned by the engine

use crate::event::{Event, TestId};
use std::collections::{HashMap, HashSet};

/// Where captured output is buffered while a test is running.
///
/// `current`/`buffer` follow the most recently started test. `own` holds one
/// buffer per test and is only used by own-identity attribution.
#[derive(Debug, Clone, Default)]
pub struct GroupingState {
    pub current: Option<TestId>,
    pub buffer: Vec<Event>,
    pub own: HashMap<TestId, Vec<Event>>,
    started: Vec<TestId>,
    seen: HashSet<TestId>,
    finished: HashSet<TestId>,
}

impl GroupingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `run` event: the new test becomes current and the buffer restarts.
    /// A re-run test is unfinished again until its next terminal event.
    pub fn begin(&mut self, id: TestId) {
        self.buffer.clear();
        self.finished.remove(&id);
        if self.seen.insert(id.clone()) {
            self.started.push(id.clone());
        }
        self.current = Some(id);
    }

    /// Note a terminal event for `id`
    pub fn finish(&mut self, id: &TestId) {
        self.finished.insert(id.clone());
    }

    /// Started tests with no terminal event, in first-seen order
    pub fn dangling(&self) -> Vec<TestId> {
        self.started
            .iter()
            .filter(|id| !self.finished.contains(*id))
            .cloned()
            .collect()
    }
}
