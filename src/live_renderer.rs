use crate::color::{ColorSink, ColorTag};
use crate::failure_detail::{self, DetailKind, FailureDetail};
use crate::performance::{round_millis, PerformanceThresholds};
use crate::test_observer::{TestIdentity, TestObserver};
use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Per-test transient state, created at test start and consumed at test end.
struct TestProgress {
    glyph: char,
    color: ColorTag,
    detail: Option<FailureDetail>,
}

impl Default for TestProgress {
    fn default() -> Self {
        Self {
            glyph: '.',
            color: ColorTag::NeutralBold,
            detail: None,
        }
    }
}

/// Final tally of a rendered run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Renders one line of terminal output per test, live, as lifecycle events
/// arrive from the runner.
///
/// The whole status line is emitted at test end so the glyph and the
/// descriptive name always carry a matching color. Events arriving out of
/// order are tolerated defensively rather than rejected: a test end without a
/// preceding start renders with the pass defaults, and a test start always
/// wipes whatever the previous test left behind.
pub struct LiveResultRenderer<S: ColorSink> {
    sink: S,
    thresholds: PerformanceThresholds,
    tests_run: usize,
    total_tests: usize,
    failed_tests: usize,
    run_started: Option<Instant>,
    current: TestProgress,
    last_test_failed: bool,
}

impl<S: ColorSink> LiveResultRenderer<S> {
    pub fn new(sink: S) -> Self {
        Self::with_thresholds(sink, PerformanceThresholds::default())
    }

    pub fn with_thresholds(sink: S, thresholds: PerformanceThresholds) -> Self {
        Self {
            sink,
            thresholds,
            tests_run: 0,
            total_tests: 0,
            failed_tests: 0,
            run_started: None,
            current: TestProgress::default(),
            last_test_failed: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether a failure or error event fired for the most recent test.
    pub fn last_test_failed(&self) -> bool {
        self.last_test_failed
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.tests_run,
            failed: self.failed_tests,
        }
    }

    /// Records the glyph and color to emit for the current test. Zero calls
    /// between test start and test end imply a pass.
    pub fn on_test_glyph(&mut self, glyph: char, color: ColorTag) {
        self.current.glyph = glyph;
        self.current.color = color;
    }

    // A zero-test run renders a constant 0% instead of dividing by zero.
    fn percent_complete(&self) -> usize {
        if self.total_tests == 0 {
            return 0;
        }
        self.tests_run * 100 / self.total_tests
    }

    fn write_performance(&mut self, elapsed: Duration) -> io::Result<()> {
        let ms = round_millis(elapsed);
        let tag = self.thresholds.select(ms);
        self.sink.write_colored(tag, &format!(" ({} ms)", ms))
    }

    fn print_exception_trace(&mut self, detail: &FailureDetail) -> io::Result<()> {
        self.sink.write_newline()?;

        for line in detail.summary().lines() {
            match detail.kind() {
                DetailKind::Error => self.write_headline(line)?,
                DetailKind::Failure => {
                    self.sink.write_colored(ColorTag::HighSeverity, line)?;
                    self.sink.write_newline()?;
                }
            }
        }

        // Frame lines never get the banner treatment, even when they contain
        // a ": " of their own.
        for frame in detail.frames() {
            self.sink.write_colored(ColorTag::HighSeverity, frame)?;
            self.sink.write_newline()?;
        }

        if let Some(comparison) = detail.comparison() {
            failure_detail::write_comparison(&mut self.sink, comparison)?;
        }

        Ok(())
    }

    /// Banner for an `ExceptionClass: message` headline: an inverse padding
    /// line as wide as the boxed class name, the class name on an inverse
    /// background beside the message, then the padding line again. A line not
    /// shaped like a headline falls back to a plain severity-colored line.
    fn write_headline(&mut self, line: &str) -> io::Result<()> {
        let Some(pos) = line.find(": ") else {
            self.sink.write_colored(ColorTag::HighSeverity, line)?;
            return self.sink.write_newline();
        };

        let padding = " ".repeat(pos + 2);

        self.sink
            .write_colored(ColorTag::HighSeverityInverse, &padding)?;
        self.sink.write_newline()?;

        self.sink.write_colored(
            ColorTag::HighSeverityInverse,
            &format!(" {} ", &line[..pos]),
        )?;
        self.sink
            .write_colored(ColorTag::HighSeverity, &line[pos + 1..])?;
        self.sink.write_newline()?;

        self.sink
            .write_colored(ColorTag::HighSeverityInverse, &padding)?;
        self.sink.write_newline()
    }

    /// Writes the run footer and returns the final tally.
    pub fn finish(&mut self) -> io::Result<RunSummary> {
        let elapsed = self
            .run_started
            .map(|started| started.elapsed())
            .unwrap_or_default();

        self.sink.write_plain(&format!(
            "{} tests executed in: {:.4}s",
            self.tests_run,
            elapsed.as_secs_f32()
        ))?;
        self.sink.write_newline()?;

        let summary = self.summary();
        let verdict = format!("[{}/{}] tests pass", summary.passed(), summary.total);
        let tag = if summary.all_passed() {
            ColorTag::NeutralBold
        } else {
            ColorTag::HighSeverityBold
        };
        self.sink.write_colored(tag, &verdict)?;
        self.sink.write_newline()?;

        Ok(summary)
    }
}

impl<S: ColorSink> TestObserver for LiveResultRenderer<S> {
    fn on_run_start(&mut self, total_tests: usize) -> io::Result<()> {
        self.total_tests = total_tests;
        self.tests_run = 0;
        self.failed_tests = 0;
        self.run_started = Some(Instant::now());
        self.current = TestProgress::default();
        self.last_test_failed = false;
        Ok(())
    }

    fn on_test_start(&mut self, _test: &TestIdentity) -> io::Result<()> {
        self.current = TestProgress::default();
        self.last_test_failed = false;
        Ok(())
    }

    fn on_test_failure(&mut self, _test: &TestIdentity, detail: FailureDetail) -> io::Result<()> {
        self.on_test_glyph('F', ColorTag::HighSeverityBold);
        // Last write wins if both a failure and an error fire for one test.
        self.current.detail = Some(detail);
        self.last_test_failed = true;
        Ok(())
    }

    fn on_test_error(&mut self, _test: &TestIdentity, detail: FailureDetail) -> io::Result<()> {
        self.on_test_glyph('E', ColorTag::HighSeverityBold);
        self.current.detail = Some(detail);
        self.last_test_failed = true;
        Ok(())
    }

    fn on_test_skipped(&mut self, _test: &TestIdentity) -> io::Result<()> {
        self.on_test_glyph('S', ColorTag::MediumSeverity);
        Ok(())
    }

    fn on_test_incomplete(&mut self, _test: &TestIdentity) -> io::Result<()> {
        self.on_test_glyph('I', ColorTag::MediumSeverity);
        Ok(())
    }

    fn on_test_end(&mut self, test: &TestIdentity, elapsed: Duration) -> io::Result<()> {
        self.tests_run += 1;
        if self.last_test_failed {
            self.failed_tests += 1;
        }

        let outcome = std::mem::take(&mut self.current);

        self.sink.write_plain(&format!(
            "{:>3}% {} ",
            self.percent_complete(),
            outcome.glyph
        ))?;
        self.sink.write_colored(outcome.color, test.label())?;
        self.write_performance(elapsed)?;
        self.sink.write_newline()?;

        if let Some(detail) = outcome.detail {
            self.print_exception_trace(&detail)?;
        }

        Ok(())
    }
}
