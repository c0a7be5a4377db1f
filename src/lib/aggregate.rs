//! Summary statistics over the annotated metric table.
//!
//! [`aggregate`] reduces the table to headline counts plus three binned distributions:
//! fragment length, GC content and mismatch count. Bin layouts are fixed so reports are
//! comparable across runs.
//!
//! # Binning rule
//!
//! A layout is a list of ascending edges. Every bin is half-open `[lo, hi)` except the last
//! finite bin, which is closed `[lo, hi]`. Layouts with an overflow bin put values strictly
//! greater than the last edge there. Percentages are of the distribution's total and are 0
//! when the total is 0.

use crate::read_metric::ReadMetric;

/// Ascending bin edges with one label per finite bin and an optional overflow label.
#[derive(Debug, Clone, PartialEq)]
pub struct BinLayout {
    edges: Vec<f64>,
    labels: Vec<String>,
    overflow: Option<String>,
}

impl BinLayout {
    /// Fragment length: `<50`, `50-100`, ..., `600-650`, `>650`.
    #[must_use]
    pub fn fragment_length() -> Self {
        let edges: Vec<f64> = (0..=650u32).step_by(50).map(f64::from).collect();
        let labels = (0..13u32)
            .map(|i| if i == 0 { "<50".to_string() } else { format!("{}-{}", i * 50, (i + 1) * 50) })
            .collect();
        Self { edges, labels, overflow: Some(">650".to_string()) }
    }

    /// GC content: four equal-width bins over `[0, 1]`.
    #[must_use]
    pub fn gc_content() -> Self {
        Self {
            edges: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            labels: ["0-0.25", "0.25-0.5", "0.5-0.75", "0.75-1.0"].map(String::from).to_vec(),
            overflow: None,
        }
    }

    /// Mismatch count: `0` through `9`, then `>10`. A count of 10 lands in bin `9`.
    #[must_use]
    pub fn mismatches() -> Self {
        Self {
            edges: (0..=10u32).map(f64::from).collect(),
            labels: (0..10).map(|i: u32| i.to_string()).collect(),
            overflow: Some(">10".to_string()),
        }
    }

    /// Number of bins including the overflow bin.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.labels.len() + usize::from(self.overflow.is_some())
    }

    /// Index of the bin holding `value`, or `None` if no bin does (below the first edge,
    /// above the last edge without an overflow bin, or NaN).
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let finite = self.labels.len();
        let (first, last) = (self.edges[0], self.edges[finite]);
        if value.is_nan() || value < first {
            None
        } else if value > last {
            self.overflow.as_ref().map(|_| finite)
        } else {
            let at_or_below = self.edges.partition_point(|&edge| edge <= value);
            Some((at_or_below - 1).min(finite - 1))
        }
    }

    /// Bins `values` into a [`Distribution`]. Values that fall in no bin are not counted.
    #[must_use]
    pub fn distribution<I: IntoIterator<Item = f64>>(&self, values: I) -> Distribution {
        let mut counts = vec![0u64; self.num_bins()];
        for value in values {
            if let Some(idx) = self.bin_index(value) {
                counts[idx] += 1;
            }
        }
        let total: u64 = counts.iter().sum();

        let bins = self
            .labels
            .iter()
            .chain(self.overflow.iter())
            .zip(counts)
            .map(|(label, count)| DistributionBin {
                label: label.clone(),
                count,
                percent: percent(count, total),
            })
            .collect();
        Distribution { bins, total }
    }
}

/// One bin of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBin {
    /// Display label, e.g. `50-100`
    pub label: String,
    /// Number of rows in the bin
    pub count: u64,
    /// Share of the distribution's total, in percent
    pub percent: f64,
}

/// A binned distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Bins in layout order
    pub bins: Vec<DistributionBin>,
    /// Number of values counted
    pub total: u64,
}

impl Distribution {
    /// Looks up a bin by label.
    #[must_use]
    pub fn bin(&self, label: &str) -> Option<&DistributionBin> {
        self.bins.iter().find(|b| b.label == label)
    }
}

/// Aggregate view of one run's metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Rows in the table
    pub total_reads: u64,
    /// Rows with `overlap = true`
    pub overlapping_reads: u64,
    /// Mean of `avg_base_quality` over all rows, reads without qualities contributing 0
    pub mean_avg_base_quality: f64,
    /// Rows with no mismatch count; these are left out of the mismatch distribution
    pub reads_without_mismatch_tag: u64,
    /// Fragment length distribution
    pub fragment_length: Distribution,
    /// GC content distribution
    pub gc_content: Distribution,
    /// Mismatch count distribution
    pub mismatches: Distribution,
}

impl Summary {
    /// Fraction of rows that overlap a region, 0 for an empty table.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn overlap_fraction(&self) -> f64 {
        if self.total_reads == 0 {
            0.0
        } else {
            self.overlapping_reads as f64 / self.total_reads as f64
        }
    }
}

/// Reduces the metric table to a [`Summary`]. An empty table gives all-zero counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(metrics: &[ReadMetric]) -> Summary {
    let total_reads = metrics.len() as u64;
    let overlapping_reads = metrics.iter().filter(|m| m.overlap).count() as u64;
    let mean_avg_base_quality = if metrics.is_empty() {
        0.0
    } else {
        metrics.iter().map(|m| m.avg_base_quality).sum::<f64>() / metrics.len() as f64
    };
    let reads_without_mismatch_tag =
        metrics.iter().filter(|m| m.num_mismatches.is_none()).count() as u64;

    Summary {
        total_reads,
        overlapping_reads,
        mean_avg_base_quality,
        reads_without_mismatch_tag,
        fragment_length: BinLayout::fragment_length()
            .distribution(metrics.iter().map(|m| m.fragment_length as f64)),
        gc_content: BinLayout::gc_content().distribution(metrics.iter().map(|m| m.gc_content)),
        mismatches: BinLayout::mismatches()
            .distribution(metrics.iter().filter_map(|m| m.num_mismatches).map(f64::from)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { count as f64 * 100.0 / total as f64 }
}
