//! Logging utilities for formatted output.
//!
//! This module provides consistent, user-friendly logging utilities for
//! stage timing, progress reporting, and summary formatting.

use std::time::{Duration, Instant};

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use stlift_lib::logging::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut groups: Vec<&[u8]> = bytes.rchunks(3).collect();
    groups.reverse();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        for &b in *group {
            out.push(b as char);
        }
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with the given decimal places.
///
/// # Examples
///
/// ```
/// use stlift_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(0.5, 1), "50.0%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use stlift_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a rate (items per second) with appropriate units.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} items/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} items/s", format_count(rate as u64))
    } else {
        let items_per_min = count as f64 / (secs / 60.0);
        format!("{items_per_min:.1} items/min")
    }
}

/// Stage timing and summary helper.
///
/// Logs the stage name when created and a completion line with the item
/// count, elapsed time, and rate when finished.
///
/// # Examples
///
/// ```no_run
/// use stlift_lib::logging::StageTimer;
///
/// let timer = StageTimer::new("Expanding alignments");
///
/// // ... do work ...
///
/// timer.log_completion(10_000);
/// ```
pub struct StageTimer {
    stage: String,
    start_time: Instant,
}

impl StageTimer {
    /// Creates a new stage timer and logs the start.
    #[must_use]
    pub fn new(stage: &str) -> Self {
        log::info!("{stage} ...");
        Self { stage: stage.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.stage,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}

/// Progress reporter for line-oriented processing loops.
///
/// Maintains an internal count and logs a message each time the count
/// crosses an interval boundary. The stage drivers are strictly sequential,
/// so no synchronization is needed.
///
/// # Example
/// ```
/// use stlift_lib::logging::LineProgress;
///
/// let mut progress = LineProgress::new("Processed rows").with_interval(100);
///
/// for _ in 0..250 {
///     progress.log_if_needed(1); // logs at 100 and 200
/// }
/// progress.log_final(); // logs "Processed rows 250 (complete)"
/// ```
pub struct LineProgress {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Count of items processed.
    count: u64,
}

impl LineProgress {
    /// Creates a new progress reporter with a default interval of 1,000,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 1_000_000, message: message.into(), count: 0 }
    }

    /// Sets the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Adds to the count and logs once per interval boundary crossed.
    ///
    /// Returns `true` if the new count lands exactly on an interval, which
    /// lets `log_final` avoid a duplicate message.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        if additional == 0 {
            return self.count > 0 && self.count % self.interval == 0;
        }

        let prev = self.count;
        self.count += additional;

        let prev_intervals = prev / self.interval;
        let new_intervals = self.count / self.interval;
        for i in (prev_intervals + 1)..=new_intervals {
            log::info!("{} {}", self.message, format_count(i * self.interval));
        }

        self.count % self.interval == 0
    }

    /// Logs the final count unless the last `log_if_needed` already did.
    pub fn log_final(&mut self) {
        if !self.log_if_needed(0) && self.count > 0 {
            log::info!("{} {} (complete)", self.message, format_count(self.count));
        }
    }

    /// The current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
