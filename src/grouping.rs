// Grouping engine - folds the ordered event stream into result mappings
//
// Default attribution follows the most recently started test: an `output`
// event is buffered for whichever test ran last, not for the test named in
// the event. With tests interleaving upstream (t.Parallel) this misattributes
// output; `AttributionMode::Own` keys buffers by the event's own test instead.

use crate::event::{Action, Event};
use crate::state::{GroupingState, Outcome, TestGroup, TestOutcomes};
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// How `output` events are attributed to tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributionMode {
    /// Attribute to the most recently started test
    #[default]
    Current,
    /// Attribute to the test named in the event
    Own,
}

impl std::str::FromStr for AttributionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "own" => Ok(Self::Own),
            other => Err(format!(
                "unknown attribution mode '{}' (expected current or own)",
                other
            )),
        }
    }
}

impl std::fmt::Display for AttributionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Own => f.write_str("own"),
        }
    }
}

/// Single-pass grouping state machine.
///
/// Feed events in stream order with [`GroupingEngine::observe`], then call
/// [`GroupingEngine::finish`] to get the passed/failed/skipped mappings.
pub struct GroupingEngine<'w> {
    mode: AttributionMode,
    state: GroupingState,
    outcomes: TestOutcomes,
    echo: Option<&'w mut dyn Write>,
    position: usize,
}

impl<'w> GroupingEngine<'w> {
    pub fn new(mode: AttributionMode) -> Self {
        Self {
            mode,
            state: GroupingState::new(),
            outcomes: TestOutcomes::new(),
            echo: None,
            position: 0,
        }
    }

    /// Write every event's output text verbatim to `sink` as it is observed
    pub fn with_echo(mut self, sink: &'w mut dyn Write) -> Self {
        self.echo = Some(sink);
        self
    }

    /// Process one event. Only a failing echo write returns an error.
    pub fn observe(&mut self, event: &Event) -> io::Result<()> {
        if let (Some(sink), Some(text)) = (self.echo.as_deref_mut(), event.output.as_deref()) {
            sink.write_all(text.as_bytes())?;
        }

        self.apply(event);
        Ok(())
    }

    fn apply(&mut self, event: &Event) {
        self.position += 1;

        // Package-level events carry no test identity
        let Some(id) = event.test_id() else {
            return;
        };

        match event.action {
            Action::Run => {
                if let Some(previous) = &self.state.current
                    && self.mode == AttributionMode::Current
                    && !self.state.buffer.is_empty()
                {
                    trace!("Dropping {} buffered event(s) of {}", self.state.buffer.len(), previous);
                }
                if self.mode == AttributionMode::Own {
                    self.state.own.insert(id.clone(), Vec::new());
                }
                self.state.begin(id);
            }
            Action::Output => match self.mode {
                AttributionMode::Current => self.state.buffer.push(event.clone()),
                AttributionMode::Own => self.state.own.entry(id).or_default().push(event.clone()),
            },
            action => {
                let Some(outcome) = Outcome::from_action(action) else {
                    return;
                };

                let events = match self.mode {
                    AttributionMode::Current => {
                        if self.state.current.as_ref() != Some(&id) {
                            debug!(
                                "{:?} for {} while {} is current",
                                outcome,
                                id,
                                self.state
                                    .current
                                    .as_ref()
                                    .map(ToString::to_string)
                                    .unwrap_or_else(|| String::from("no test"))
                            );
                        }
                        self.state.buffer.clone()
                    }
                    AttributionMode::Own => self.state.own.remove(&id).unwrap_or_default(),
                };

                self.state.finish(&id);
                self.outcomes
                    .record(outcome, TestGroup::new(id, events, event.elapsed, self.position));
            }
        }
    }

    /// End of stream: hand over the completed mappings
    pub fn finish(mut self) -> TestOutcomes {
        let dangling = self.state.dangling();
        for id in &dangling {
            warn!("Test {} started but never reported pass, fail or skip", id);
        }
        self.outcomes.set_incomplete(dangling);
        self.outcomes
    }
}

/// Group an in-memory event sequence without echo
pub fn group_events<'a, I>(events: I, mode: AttributionMode) -> TestOutcomes
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut engine = GroupingEngine::new(mode);
    for event in events {
        engine.apply(event);
    }
    engine.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TestId;

    fn run(test: &str) -> Event {
        Event::new(Action::Run, "pkg").with_test(test)
    }

    fn output(test: &str, text: &str) -> Event {
        Event::new(Action::Output, "pkg")
            .with_test(test)
            .with_output(text)
    }

    fn terminal(action: Action, test: &str) -> Event {
        Event::new(action, "pkg").with_test(test).with_elapsed(0.1)
    }

    fn id(name: &str) -> TestId {
        TestId::new("pkg", name)
    }

    #[test]
    fn test_groups_by_terminal_action() {
        let events = vec![
            Event::new(Action::Start, "pkg"),
            run("Test_main"),
            output("Test_main", "=== RUN   Test_main\n"),
            output("Test_main", "--- PASS: Test_main (0.00s)\n"),
            terminal(Action::Pass, "Test_main"),
            run("Test_bar"),
            output("Test_bar", "=== RUN   Test_bar\n"),
            output("Test_bar", "bar\n"),
            output("Test_bar", "    bar_test.go:9: bar()\n"),
            output("Test_bar", "--- FAIL: Test_bar (0.00s)\n"),
            terminal(Action::Fail, "Test_bar"),
            run("Test_foo2"),
            output("Test_foo2", "=== RUN   Test_foo2\n"),
            output("Test_foo2", "    foo_test.go:13: \n"),
            output("Test_foo2", "--- SKIP: Test_foo2 (0.00s)\n"),
            terminal(Action::Skip, "Test_foo2"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);

        assert_eq!(outcomes.passed()[&id("Test_main")].events.len(), 2);
        assert_eq!(outcomes.failed()[&id("Test_bar")].events.len(), 4);
        assert_eq!(outcomes.skipped()[&id("Test_foo2")].events.len(), 3);
        assert_eq!(outcomes.total(), 3);
        assert!(outcomes.incomplete().is_empty());
    }

    #[test]
    fn test_terminal_keeps_elapsed() {
        let events = vec![run("T"), terminal(Action::Pass, "T")];
        let outcomes = group_events(&events, AttributionMode::Current);
        assert_eq!(outcomes.passed()[&id("T")].elapsed, Some(0.1));
    }

    #[test]
    fn test_buffer_survives_terminal_until_next_run() {
        // Without a run in between, the second terminal sees the same buffer
        let events = vec![
            run("A"),
            output("A", "a\n"),
            terminal(Action::Pass, "A"),
            terminal(Action::Skip, "B"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        assert_eq!(outcomes.passed()[&id("A")].events.len(), 1);
        assert_eq!(outcomes.skipped()[&id("B")].events.len(), 1);
    }

    #[test]
    fn test_current_mode_attributes_to_latest_run() {
        let events = vec![
            run("A"),
            run("B"),
            output("A", "    a_test.go:3: from A\n"),
            terminal(Action::Fail, "A"),
            terminal(Action::Pass, "B"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        // The output names A but lands in the shared buffer of B's cycle
        assert_eq!(outcomes.failed()[&id("A")].events.len(), 1);
        assert_eq!(outcomes.passed()[&id("B")].events.len(), 1);
    }

    #[test]
    fn test_own_mode_attributes_to_event_test() {
        let events = vec![
            run("A"),
            run("B"),
            output("A", "    a_test.go:3: from A\n"),
            output("B", "--- PASS: B (0.00s)\n"),
            terminal(Action::Fail, "A"),
            terminal(Action::Pass, "B"),
        ];

        let outcomes = group_events(&events, AttributionMode::Own);
        let failed = &outcomes.failed()[&id("A")];
        assert_eq!(failed.events.len(), 1);
        assert_eq!(failed.events[0].trimmed_output(), Some("a_test.go:3: from A"));
        let passed = &outcomes.passed()[&id("B")];
        assert_eq!(passed.events.len(), 1);
        assert_eq!(passed.events[0].trimmed_output(), Some("--- PASS: B (0.00s)"));
    }

    #[test]
    fn test_run_discards_previous_buffer() {
        let events = vec![
            run("A"),
            output("A", "lost\n"),
            run("B"),
            output("B", "kept\n"),
            terminal(Action::Pass, "B"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        let passed = &outcomes.passed()[&id("B")];
        assert_eq!(passed.events.len(), 1);
        assert_eq!(passed.events[0].trimmed_output(), Some("kept"));
        assert_eq!(outcomes.incomplete(), &[id("A")]);
    }

    #[test]
    fn test_rerun_without_terminal_is_incomplete() {
        let events = vec![
            run("T"),
            terminal(Action::Fail, "T"),
            run("T"),
            output("T", "retrying\n"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        assert_eq!(outcomes.incomplete(), &[id("T")]);
        assert!(outcomes.failed().contains_key(&id("T")));
    }

    #[test]
    fn test_current_mode_keeps_no_own_buffers() {
        let mut engine = GroupingEngine::new(AttributionMode::Current);
        for event in &[run("A"), output("A", "a\n"), run("B"), output("B", "b\n")] {
            engine.observe(event).expect("no echo sink");
        }
        assert!(engine.state.own.is_empty());
        assert_eq!(engine.state.buffer.len(), 1);
    }

    #[test]
    fn test_own_mode_drops_buffer_on_terminal() {
        let mut engine = GroupingEngine::new(AttributionMode::Own);
        for event in &[run("A"), output("A", "a\n"), terminal(Action::Pass, "A")] {
            engine.observe(event).expect("no echo sink");
        }
        assert!(engine.state.own.is_empty());
    }

    #[test]
    fn test_events_without_test_are_not_grouped() {
        let events = vec![
            Event::new(Action::Start, "pkg"),
            Event::new(Action::Output, "pkg").with_output("PASS\n"),
            Event::new(Action::Pass, "pkg").with_elapsed(0.2),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        assert_eq!(outcomes.total(), 0);
    }

    #[test]
    fn test_unknown_actions_are_ignored() {
        let events = vec![
            run("A"),
            Event::new(Action::Pause, "pkg").with_test("A"),
            Event::new(Action::Cont, "pkg").with_test("A"),
            Event::new(Action::Unknown, "pkg").with_test("A"),
            terminal(Action::Pass, "A"),
        ];

        let outcomes = group_events(&events, AttributionMode::Current);
        assert!(outcomes.passed()[&id("A")].events.is_empty());
    }

    #[test]
    fn test_echo_writes_each_output_once() {
        let events = vec![
            Event::new(Action::Output, "pkg").with_output("ok  \tpkg\t0.1s\n"),
            run("A"),
            output("A", "=== RUN   A\n"),
            terminal(Action::Pass, "A"),
        ];

        let mut sink: Vec<u8> = Vec::new();
        let mut engine = GroupingEngine::new(AttributionMode::Current).with_echo(&mut sink);
        for event in &events {
            engine.observe(event).expect("writing to a Vec cannot fail");
        }
        let outcomes = engine.finish();

        assert_eq!(String::from_utf8(sink).unwrap(), "ok  \tpkg\t0.1s\n=== RUN   A\n");
        assert_eq!(outcomes.passed().len(), 1);
    }

    #[test]
    fn test_attribution_mode_from_str() {
        assert_eq!("current".parse::<AttributionMode>(), Ok(AttributionMode::Current));
        assert_eq!("OWN".parse::<AttributionMode>(), Ok(AttributionMode::Own));
        assert!("other".parse::<AttributionMode>().is_err());
        assert_eq!(AttributionMode::Own.to_string(), "own");
    }
}
