// Tests for the console report - public API only

use std::io::Cursor;

use gotest_report::commands::fold_events;
use gotest_report::report::Category;
use gotest_report::source::EventReader;
use gotest_report::{AttributionMode, ColorMode, ConsoleReporter, DisplayMode, TestOutcomes};

fn outcomes_from(content: &str) -> TestOutcomes {
    fold_events(
        EventReader::new(Cursor::new(content.to_string()), "inline"),
        AttributionMode::Current,
        None,
    )
    .expect("valid stream")
}

fn fixture(name: &str) -> TestOutcomes {
    let path = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name);
    outcomes_from(&std::fs::read_to_string(path).expect("Failed to read fixture"))
}

fn separator() -> String {
    "-".repeat(120)
}

#[test]
fn test_failure_scenario_shows_source_line() {
    // Arrange
    let outcomes = outcomes_from(concat!(
        r#"{"Action":"run","Package":"pkg","Test":"T2"}"#,
        "\n",
        r#"{"Action":"output","Package":"pkg","Test":"T2","Output":"x_test.go:9: boom\n"}"#,
        "\n",
        r#"{"Action":"fail","Package":"pkg","Test":"T2"}"#,
        "\n",
    ));
    let reporter = ConsoleReporter::new(DisplayMode::FailuresOnly, ColorMode::Never);

    // Act
    let rendered = reporter.render_to_string(&outcomes);

    // Assert
    let entries: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("pkg:T2 "))
        .collect();
    assert_eq!(entries, vec!["pkg:T2 x_test.go:9: boom"]);
}

#[test]
fn test_failures_only_with_skip_only_stream() {
    // Arrange
    let outcomes = fixture("skip_only.jsonl");
    let reporter = ConsoleReporter::new(DisplayMode::FailuresOnly, ColorMode::Never);

    // Act
    let rendered = reporter.render_to_string(&outcomes);

    // Assert
    assert_eq!(rendered, format!("{sep}\nFailed\n{sep}\n", sep = separator()));
    assert!(!rendered.contains("Skipped"));
}

#[test]
fn test_all_mode_sample_report() {
    // Arrange
    let outcomes = fixture("results_sample.jsonl");
    let reporter = ConsoleReporter::new(DisplayMode::All, ColorMode::Never);

    // Act
    let rendered = reporter.render_to_string(&outcomes);

    // Assert
    let sep = separator();
    let expected = [
        sep.as_str(),
        "Failed",
        sep.as_str(),
        "github.com/example/sample:Test_bar sample_test.go:10: Test_bar",
        sep.as_str(),
        "Skipped",
        sep.as_str(),
        "github.com/example/sample:Test_bar2 --- SKIP: Test_bar2 (0.00s)",
        sep.as_str(),
        "Passed",
        sep.as_str(),
        "github.com/example/sample:Test_bar3 --- PASS: Test_bar3 (0.00s)",
    ]
    .join("\n")
        + "\n";
    assert_eq!(rendered, expected);
}

#[test]
fn test_sections_follow_display_mode() {
    let outcomes = fixture("results_sample.jsonl");

    let failures = ConsoleReporter::new(DisplayMode::FailuresOnly, ColorMode::Never);
    assert_eq!(failures.sections(&outcomes), vec![Category::Failed]);

    let all = ConsoleReporter::new(DisplayMode::All, ColorMode::Never);
    assert_eq!(
        all.sections(&outcomes),
        vec![Category::Failed, Category::Skipped, Category::Passed]
    );
}

#[test]
fn test_rendering_twice_is_identical() {
    let outcomes = fixture("results_sample.jsonl");
    let reporter = ConsoleReporter::new(DisplayMode::All, ColorMode::Always).with_summary(true);

    assert_eq!(
        reporter.render_to_string(&outcomes),
        reporter.render_to_string(&outcomes)
    );
}

#[test]
fn test_styling_toggle_only_changes_escapes() {
    let outcomes = fixture("results_sample.jsonl");
    let plain = ConsoleReporter::new(DisplayMode::All, ColorMode::Never).render_to_string(&outcomes);
    let styled =
        ConsoleReporter::new(DisplayMode::All, ColorMode::Always).render_to_string(&outcomes);

    assert!(!plain.contains('\u{1b}'));
    assert!(styled.contains('\u{1b}'));
    assert_eq!(console::strip_ansi_codes(&styled), plain);
}
