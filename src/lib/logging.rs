//! Formatting and logging helpers for counts, durations and run summaries.

use std::time::{Duration, Instant};

use crate::aggregate::Summary;

/// Formats a count with comma thousands separators.
///
/// # Examples
///
/// ```
/// use readstats_lib::logging::format_count;
///
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(42), "42");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use readstats_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration as e.g. `45s`, `2m 15s` or `1h 30m`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let (mins, rem) = (secs / 60, secs % 60);
        if rem == 0 { format!("{mins}m") } else { format!("{mins}m {rem}s") }
    } else {
        let (hours, mins) = (secs / 3600, (secs % 3600) / 60);
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate as reads per second, or per minute below one per second.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} reads/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} reads/s", format_count(rate as u64))
    } else {
        format!("{:.1} reads/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the headline numbers of a run.
///
/// `excluded_unmapped` and `excluded_secondary` are the reads dropped before the table was
/// built; they are not part of `summary`.
pub fn log_summary(summary: &Summary, excluded_unmapped: u64, excluded_secondary: u64) {
    log::info!("Read Stats Summary:");
    log::info!("  Mapped reads: {}", format_count(summary.total_reads));
    log::info!("  Excluded unmapped reads: {}", format_count(excluded_unmapped));
    log::info!("  Excluded secondary alignments: {}", format_count(excluded_secondary));
    log::info!(
        "  Overlapping reads: {} ({})",
        format_count(summary.overlapping_reads),
        format_percent(summary.overlap_fraction(), 2)
    );
    log::info!("  Mean base quality: {:.2}", summary.mean_avg_base_quality);

    if summary.reads_without_mismatch_tag > 0 {
        log::info!(
            "  Reads without an NM tag: {}",
            format_count(summary.reads_without_mismatch_tag)
        );
    }
}

/// Operation timing helper.
///
/// # Examples
///
/// ```no_run
/// use readstats_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Computing read metrics");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.elapsed();
        log::info!(
            "{} completed: {} reads in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
