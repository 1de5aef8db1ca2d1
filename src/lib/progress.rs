//! Progress tracking utilities
//!
//! This module provides a progress tracker for logging progress at regular
//! intervals. The tracker maintains an internal count and logs when interval
//! boundaries are crossed. The engine is strictly single-threaded, so the
//! tracker is a plain counter with `&mut self` updates.

use log::info;

/// Progress tracker for logging progress at regular intervals.
///
/// Maintains an internal count and logs progress messages when the count
/// crosses interval boundaries.
///
/// # Example
/// ```
/// use linekit_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Processed records")
///     .with_interval(100);
///
/// // Add records and log at interval boundaries
/// for _ in 0..250 {
///     tracker.log_if_needed(1);  // Logs at 100, 200
/// }
/// tracker.log_final();  // Logs "Processed records 250 (complete)"
/// ```
pub struct ProgressTracker {
    /// The logging interval - progress is logged when count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Count of records processed so far.
    count: u64,
}

impl ProgressTracker {
    /// Creates a new progress tracker with the specified message.
    ///
    /// The tracker starts with a count of 0 and a default interval of 10,000.
    ///
    /// # Arguments
    /// * `message` - Message prefix for progress logs (e.g., "Processed records")
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: 0 }
    }

    /// Set the logging interval.
    ///
    /// Progress will be logged each time the count crosses a multiple of this
    /// interval. For example, with interval=1000, logs occur at 1000, 2000, etc.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Add to the count and log if an interval boundary was crossed.
    ///
    /// Logs one message per boundary crossed, so a large `additional` that
    /// jumps several intervals still reports each milestone.
    ///
    /// # Returns
    /// `true` if the new count is exactly a multiple of the interval,
    /// `false` otherwise. This is how `log_final()` knows whether a final
    /// message is still needed.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            let milestone = i * self.interval;
            info!("{} {}", self.message, milestone);
        }

        self.count > 0 && self.count % self.interval == 0
    }

    /// Log final progress.
    ///
    /// If the current count is not exactly on an interval boundary, logs a
    /// final message with "(complete)". If it is, the last `log_if_needed`
    /// call already reported it, so nothing more is logged.
    pub fn log_final(&self) {
        if self.count > 0 && self.count % self.interval != 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// Get the current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
