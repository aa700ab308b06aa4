//! Live console renderer for test runs.
//!
//! Renders one line per completed test (progress percentage, status glyph,
//! the test's descriptive name, a severity-colored timing) and prints
//! failure traces immediately instead of deferring them to an end-of-run
//! summary. The renderer is a passive sink for lifecycle events produced by
//! an external test runner; it never discovers or executes tests itself.

mod color;
mod event_log;
mod failure_detail;
mod live_renderer;
mod performance;
mod reporter_config;
mod test_observer;

#[cfg(test)]
mod test_support;

pub use color::{AnsiSink, ColorSink, ColorTag};
pub use event_log::{replay, EventLogError, RecordedRun};
pub use failure_detail::{Comparison, DetailKind, FailureDetail};
pub use live_renderer::{LiveResultRenderer, RunSummary};
pub use performance::PerformanceThresholds;
pub use reporter_config::{ConfigError, ReporterConfig};
pub use test_observer::{TestIdentity, TestObserver};
