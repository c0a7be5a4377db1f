//! Metric rows written to TSV files.
//!
//! - [`read_table`] - The per-read output table (`output.tsv`)
//! - [`summary`] - Run summary and histogram rows
//! - [`writer`] - Metrics file I/O utilities
//!
//! # Traits
//!
//! - [`Metric`] - Core trait for serializable metric rows

pub mod read_table;
pub mod summary;
pub mod writer;

use serde::{Deserialize, Serialize};

pub use read_table::ReadTableRow;
pub use summary::{HistogramBinMetric, RunSummaryMetric};
pub use writer::{write_metrics, write_metrics_auto};

/// Number of decimal places used for quality and GC values in reports.
pub const FLOAT_PRECISION: usize = 2;

/// Formats a float value with the standard report precision.
///
/// # Example
/// ```
/// use readstats_lib::metrics::format_float;
/// assert_eq!(format_float(35.123), "35.12");
/// assert_eq!(format_float(0.5), "0.50");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// A metric row type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages when writing metrics files.
    fn metric_name() -> &'static str;
}
