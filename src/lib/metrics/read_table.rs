//! Rows of the per-read output table.

use serde::{Deserialize, Serialize};

use super::{Metric, format_float};
use crate::read_metric::ReadMetric;

/// One row of `output.tsv`.
///
/// Quality and GC content are pre-formatted with two decimals; a missing mismatch count
/// serializes as an empty field and overlap as `0`/`1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadTableRow {
    /// Read name
    #[serde(rename = "ReadID")]
    pub read_id: String,

    /// Absolute template length
    #[serde(rename = "FragmentLength")]
    pub fragment_length: u64,

    /// Mean base quality
    #[serde(rename = "AvgBaseQuality")]
    pub avg_base_quality: String,

    /// GC fraction
    #[serde(rename = "GCContent")]
    pub gc_content: String,

    /// NM tag value, blank when absent
    #[serde(rename = "NumMismatches")]
    pub num_mismatches: Option<u32>,

    /// 1 if the read overlaps a region of interest
    #[serde(rename = "Overlap")]
    pub overlap: u8,
}

impl From<&ReadMetric> for ReadTableRow {
    fn from(metric: &ReadMetric) -> Self {
        Self {
            read_id: metric.read_id.clone(),
            fragment_length: metric.fragment_length,
            avg_base_quality: format_float(metric.avg_base_quality),
            gc_content: format_float(metric.gc_content),
            num_mismatches: metric.num_mismatches,
            overlap: u8::from(metric.overlap),
        }
    }
}

impl Metric for ReadTableRow {
    fn metric_name() -> &'static str {
        "read table"
    }
}
