//! Run summary and histogram rows.

use serde::{Deserialize, Serialize};

use super::{Metric, format_float};
use crate::aggregate::{Distribution, Summary};

/// Headline numbers of one run, written as the single row of `summary.tsv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummaryMetric {
    /// Reads in the metric table (mapped, non-secondary)
    pub total_reads: u64,

    /// Reads overlapping at least one region
    pub overlapping_reads: u64,

    /// `overlapping_reads / total_reads`, 0 when there are no reads
    pub overlap_fraction: f64,

    /// Mean of the per-read average base quality
    pub mean_avg_base_quality: f64,

    /// Reads with no `NM` tag
    pub reads_without_mismatch_tag: u64,
}

impl From<&Summary> for RunSummaryMetric {
    fn from(summary: &Summary) -> Self {
        Self {
            total_reads: summary.total_reads,
            overlapping_reads: summary.overlapping_reads,
            overlap_fraction: summary.overlap_fraction(),
            mean_avg_base_quality: summary.mean_avg_base_quality,
            reads_without_mismatch_tag: summary.reads_without_mismatch_tag,
        }
    }
}

impl Metric for RunSummaryMetric {
    fn metric_name() -> &'static str {
        "run summary"
    }
}

/// One histogram bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramBinMetric {
    /// Bin label
    pub bin: String,

    /// Number of reads in the bin
    pub count: u64,

    /// Percent of the histogram's total, two decimals
    pub percent: String,
}

impl HistogramBinMetric {
    /// Converts every bin of `distribution`, in layout order.
    #[must_use]
    pub fn from_distribution(distribution: &Distribution) -> Vec<Self> {
        distribution
            .bins
            .iter()
            .map(|b| Self { bin: b.label.clone(), count: b.count, percent: format_float(b.percent) })
            .collect()
    }
}

impl Metric for HistogramBinMetric {
    fn metric_name() -> &'static str {
        "histogram"
    }
}
