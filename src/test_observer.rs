use crate::failure_detail::FailureDetail;
use std::fmt;
use std::io;
use std::time::Duration;

/// Descriptive label of a single test, e.g. `ArithmeticTest::adds_small_numbers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    label: String,
}

impl TestIdentity {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Lifecycle events a runner feeds into a renderer.
///
/// An observer is registered with the external runner by dependency
/// injection. The runner calls `on_run_start` exactly once, then for each
/// test: `on_test_start`, at most one outcome event (none means the test
/// passed) and finally `on_test_end`. Events are strictly sequential; no
/// concurrent test execution is assumed.
pub trait TestObserver {
    fn on_run_start(&mut self, total_tests: usize) -> io::Result<()>;

    fn on_test_start(&mut self, test: &TestIdentity) -> io::Result<()>;

    fn on_test_failure(&mut self, test: &TestIdentity, detail: FailureDetail) -> io::Result<()>;

    fn on_test_error(&mut self, test: &TestIdentity, detail: FailureDetail) -> io::Result<()>;

    fn on_test_skipped(&mut self, test: &TestIdentity) -> io::Result<()>;

    fn on_test_incomplete(&mut self, test: &TestIdentity) -> io::Result<()>;

    fn on_test_end(&mut self, test: &TestIdentity, elapsed: Duration) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_displays_its_label() {
        let identity = TestIdentity::new("ArithmeticTest::adds_small_numbers");
        assert_eq!(
            format!("{}", identity),
            "ArithmeticTest::adds_small_numbers"
        );
        assert_eq!(identity.label(), "ArithmeticTest::adds_small_numbers");
    }
}
