use crate::color::ColorTag;
use std::time::Duration;

/// Severity-ranked elapsed-time thresholds, most severe first.
///
/// Selection scans the table in declared order and picks the first entry the
/// elapsed milliseconds strictly exceed, falling back to the last entry. The
/// order is part of the contract; the table is never re-sorted.
#[derive(Debug, Clone)]
pub struct PerformanceThresholds {
    entries: Vec<(ColorTag, u64)>,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self::with_limits(1000, 200)
    }
}

impl PerformanceThresholds {
    /// Table with custom boundaries: above `high_ms` is high severity, above
    /// `medium_ms` is medium, everything else low.
    pub fn with_limits(high_ms: u64, medium_ms: u64) -> Self {
        Self {
            entries: vec![
                (ColorTag::HighSeverity, high_ms),
                (ColorTag::MediumSeverity, medium_ms),
                (ColorTag::LowSeverity, 0),
            ],
        }
    }

    pub fn select(&self, elapsed_ms: u64) -> ColorTag {
        self.entries
            .iter()
            .find(|(_, threshold)| elapsed_ms > *threshold)
            .or(self.entries.last())
            .map(|(tag, _)| *tag)
            .unwrap_or(ColorTag::LowSeverity)
    }
}

/// Milliseconds rounded to the nearest integer.
pub(crate) fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}
