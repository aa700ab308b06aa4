use crate::failure_detail::{Comparison, DetailKind, FailureDetail};
use crate::test_observer::{TestIdentity, TestObserver};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// A test run captured by an external runner, replayable through any
/// [`TestObserver`].
///
/// ```toml
/// total = 2
///
/// [[test]]
/// name = "ArithmeticTest::adds_small_numbers"
/// elapsed_ms = 50
///
/// [[test]]
/// name = "WidgetTest::pokes_the_widget"
/// elapsed_ms = 300
/// outcome = "error"
/// message = "RuntimeException: boom"
/// frames = ["#0 /app/src/Widget.php(12): Widget->poke()"]
/// ```
#[derive(Deserialize, Debug)]
pub struct RecordedRun {
    /// Planned test count; defaults to the number of recorded tests.
    total: Option<usize>,

    #[serde(default, rename = "test")]
    tests: Vec<RecordedTest>,
}

#[derive(Deserialize, Debug)]
struct RecordedTest {
    name: String,

    #[serde(default)]
    elapsed_ms: u64,

    #[serde(default)]
    outcome: RecordedOutcome,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    frames: Vec<String>,

    #[serde(default)]
    expected: Option<String>,

    #[serde(default)]
    actual: Option<String>,
}

#[derive(Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum RecordedOutcome {
    #[default]
    Pass,
    Failure,
    Error,
    Skipped,
    Incomplete,
}

#[derive(Debug)]
pub enum EventLogError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for EventLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventLogError::Io(error) => write!(f, "failed to read recorded run: {}", error),
            EventLogError::Parse(error) => write!(f, "failed to parse recorded run: {}", error),
        }
    }
}

impl RecordedRun {
    pub fn load(path: &Path) -> Result<Self, EventLogError> {
        let text = fs::read_to_string(path).map_err(EventLogError::Io)?;
        toml::from_str(&text).map_err(EventLogError::Parse)
    }

    pub fn total(&self) -> usize {
        self.total.unwrap_or(self.tests.len())
    }
}

impl RecordedTest {
    fn detail(&self, kind: DetailKind) -> FailureDetail {
        let message = self.message.as_deref().unwrap_or("");

        // Explicit frames take the message verbatim as the summary; without
        // them the message may be a full textual dump worth splitting.
        let mut detail = if self.frames.is_empty() {
            FailureDetail::from_text(kind, message)
        } else {
            let detail = match kind {
                DetailKind::Failure => FailureDetail::failure(message),
                DetailKind::Error => FailureDetail::error(message),
            };
            detail.with_frames(self.frames.clone())
        };

        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            detail = detail.with_comparison(Comparison::new(expected, actual));
        }

        detail
    }
}

/// Drives an observer through the lifecycle sequence the runner originally
/// produced: run start, then start / outcome / end per test.
pub fn replay<O: TestObserver>(run: &RecordedRun, observer: &mut O) -> io::Result<()> {
    observer.on_run_start(run.total())?;

    for test in &run.tests {
        let identity = TestIdentity::new(&test.name);
        observer.on_test_start(&identity)?;

        match test.outcome {
            RecordedOutcome::Pass => {}
            RecordedOutcome::Failure => {
                observer.on_test_failure(&identity, test.detail(DetailKind::Failure))?;
            }
            RecordedOutcome::Error => {
                observer.on_test_error(&identity, test.detail(DetailKind::Error))?;
            }
            RecordedOutcome::Skipped => observer.on_test_skipped(&identity)?,
            RecordedOutcome::Incomplete => observer.on_test_incomplete(&identity)?,
        }

        observer.on_test_end(&identity, Duration::from_millis(test.elapsed_ms))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live_renderer::LiveResultRenderer;
    use crate::test_support::RecordingSink;

    #[test]
    fn parses_a_recorded_run_with_defaults() {
        let run: RecordedRun = toml::from_str(
            r#"
            [[test]]
            name = "T1"

            [[test]]
            name = "T2"
            elapsed_ms = 300
            outcome = "failure"
            message = "nope"
            "#,
        )
        .unwrap();

        assert_eq!(run.total(), 2);
        assert_eq!(run.tests[0].outcome, RecordedOutcome::Pass);
        assert_eq!(run.tests[0].elapsed_ms, 0);
        assert_eq!(run.tests[1].outcome, RecordedOutcome::Failure);
    }

    #[test]
    fn explicit_total_overrides_the_test_count() {
        let run: RecordedRun = toml::from_str(
            r#"
            total = 10

            [[test]]
            name = "T1"
            "#,
        )
        .unwrap();

        assert_eq!(run.total(), 10);
    }

    #[test]
    fn replay_renders_the_whole_run() {
        let run: RecordedRun = toml::from_str(
            r##"
            [[test]]
            name = "T1"
            elapsed_ms = 50

            [[test]]
            name = "T2"
            elapsed_ms = 300
            outcome = "error"
            message = "RuntimeException: boom"
            frames = ["#0 {main}"]
            "##,
        )
        .unwrap();

        let mut renderer = LiveResultRenderer::new(RecordingSink::new());
        replay(&run, &mut renderer).unwrap();

        let lines = renderer.sink().lines();
        assert_eq!(lines[0], " 50% . T1 (50 ms)");
        assert_eq!(lines[1], "100% E T2 (300 ms)");
        assert!(renderer.sink().transcript().contains(" RuntimeException  boom"));
        assert_eq!(renderer.summary().failed, 1);
    }

    #[test]
    fn recorded_comparison_becomes_a_diff() {
        let run: RecordedRun = toml::from_str(
            r#"
            [[test]]
            name = "T1"
            outcome = "failure"
            message = "output mismatch"
            expected = "one\ntwo\n"
            actual = "one\n2\n"
            "#,
        )
        .unwrap();

        let mut renderer = LiveResultRenderer::new(RecordingSink::new());
        replay(&run, &mut renderer).unwrap();

        let transcript = renderer.sink().transcript();
        assert!(transcript.contains("output mismatch"));
        assert!(transcript.contains("-two"));
        assert!(transcript.contains("+2"));
    }

    #[test]
    fn skipped_outcome_maps_to_the_skip_glyph() {
        let run: RecordedRun = toml::from_str(
            r#"
            [[test]]
            name = "T1"
            outcome = "skipped"
            "#,
        )
        .unwrap();

        let mut renderer = LiveResultRenderer::new(RecordingSink::new());
        replay(&run, &mut renderer).unwrap();

        assert_eq!(renderer.sink().lines()[0], "100% S T1 (0 ms)");
    }
}
