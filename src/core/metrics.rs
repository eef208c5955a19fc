//! Output metrics for observability
//!
//! Sinks absorb write failures instead of reporting them to the caller, so
//! these counters are the only place such failures become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by an output sink
///
/// # Example
///
/// ```
/// use rust_log_facade::OutputMetrics;
///
/// let metrics = OutputMetrics::new();
/// metrics.record_written();
/// metrics.record_failure();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct OutputMetrics {
    /// Lines handed to the underlying writer successfully
    lines_written: AtomicU64,

    /// Lines lost because the underlying writer failed
    write_failures: AtomicU64,
}

impl OutputMetrics {
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed write, returning the previous count
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for OutputMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for OutputMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            lines_written: AtomicU64::new(self.lines_written()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}

/// Report a failed write on stderr: the first one, then every 1000th.
pub(crate) fn report_write_failure(metrics: &OutputMetrics, sink: &str, err: &dyn std::fmt::Display) {
    let previous = metrics.record_failure();
    if previous == 0 || (previous + 1).is_multiple_of(1000) {
        eprintln!(
            "[LOGGER ERROR] {} sink failed to write ({} failures so far): {}",
            sink,
            previous + 1,
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = OutputMetrics::new();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.write_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = OutputMetrics::new();
        assert_eq!(metrics.record_written(), 0);
        assert_eq!(metrics.record_written(), 1);
        assert_eq!(metrics.lines_written(), 2);
    }

    #[test]
    fn test_report_write_failure_counts() {
        let metrics = OutputMetrics::new();
        report_write_failure(&metrics, "test", &"disk full");
        report_write_failure(&metrics, "test", &"disk full");
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_metrics_clone_and_reset() {
        let metrics = OutputMetrics::new();
        metrics.record_written();
        let snapshot = metrics.clone();
        metrics.reset();
        assert_eq!(snapshot.lines_written(), 1);
        assert_eq!(metrics.lines_written(), 0);
    }
}
