// State module - grouping state and the result mappings it produces

pub mod cursor;
pub mod group;

pub use cursor::GroupingState;
pub use group::TestGroup;

use crate::event::{Action, TestId};
use std::collections::HashMap;

/// Terminal classification of a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

impl Outcome {
    /// Outcome for a terminal action, `None` for every other action
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::Pass => Some(Outcome::Pass),
            Action::Fail => Some(Outcome::Fail),
            Action::Skip => Some(Outcome::Skip),
            _ => None,
        }
    }
}

pub type ResultMapping = HashMap<TestId, TestGroup>;

/// The passed, failed and skipped mappings of one run
#[derive(Debug, Clone, Default)]
pub struct TestOutcomes {
    passed: ResultMapping,
    failed: ResultMapping,
    skipped: ResultMapping,
    incomplete: Vec<TestId>,
}

impl TestOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished test. A test recorded earlier under a different
    /// outcome is moved, so every identity lives in exactly one mapping.
    pub fn record(&mut self, outcome: Outcome, group: TestGroup) {
        for other in [Outcome::Pass, Outcome::Fail, Outcome::Skip] {
            if other != outcome {
                self.mapping_mut(other).remove(&group.id);
            }
        }
        self.mapping_mut(outcome).insert(group.id.clone(), group);
    }

    pub(crate) fn set_incomplete(&mut self, incomplete: Vec<TestId>) {
        self.incomplete = incomplete;
    }

    pub fn mapping(&self, outcome: Outcome) -> &ResultMapping {
        match outcome {
            Outcome::Pass => &self.passed,
            Outcome::Fail => &self.failed,
            Outcome::Skip => &self.skipped,
        }
    }

    fn mapping_mut(&mut self, outcome: Outcome) -> &mut ResultMapping {
        match outcome {
            Outcome::Pass => &mut self.passed,
            Outcome::Fail => &mut self.failed,
            Outcome::Skip => &mut self.skipped,
        }
    }

    pub fn passed(&self) -> &ResultMapping {
        &self.passed
    }

    pub fn failed(&self) -> &ResultMapping {
        &self.failed
    }

    pub fn skipped(&self) -> &ResultMapping {
        &self.skipped
    }

    /// Tests that started but never reached a terminal event, first-seen order
    pub fn incomplete(&self) -> &[TestId] {
        &self.incomplete
    }

    /// Which mapping holds the test, if any
    pub fn outcome_of(&self, id: &TestId) -> Option<Outcome> {
        [Outcome::Fail, Outcome::Skip, Outcome::Pass]
            .into_iter()
            .find(|outcome| self.mapping(*outcome).contains_key(id))
    }

    /// Entries of one mapping sorted by the order they were recorded
    pub fn sorted(&self, outcome: Outcome) -> Vec<&TestGroup> {
        let mut groups: Vec<&TestGroup> = self.mapping(outcome).values().collect();
        groups.sort_by_key(|group| group.ordinal);
        groups
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len() + self.skipped.len()
    }
}
