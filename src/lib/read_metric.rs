//! Per-read metric extraction.
//!
//! [`extract`] turns one [`AlignedRead`] into a [`ReadMetric`], or reports why the read is
//! excluded. Unmapped and secondary alignments are excluded; that is an ordinary outcome,
//! not an error. A read flagged as mapped but lacking its reference name or alignment start
//! is a data-integrity error, since the overlap join needs both.

use std::fmt;

use crate::alignment::AlignedRead;
use crate::errors::{ReadStatsError, Result};

/// Why a read produced no metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionReason {
    /// The read is flagged unmapped
    Unmapped,
    /// The record is a secondary alignment
    Secondary,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Unmapped => write!(f, "unmapped"),
            ExclusionReason::Secondary => write!(f, "secondary alignment"),
        }
    }
}

/// Result of running the extractor on one read.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The read qualifies and produced a metric
    Metric(ReadMetric),
    /// The read was excluded from the table
    Excluded(ExclusionReason),
}

/// Metrics derived from one qualifying read.
///
/// Every field except `overlap` is fixed at extraction; `overlap` starts `false` and is set by
/// the overlap annotator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadMetric {
    /// Read name; not unique across the table
    pub read_id: String,
    /// Absolute template length
    pub fragment_length: u64,
    /// Mean Phred base quality, 0 when the read has no qualities
    pub avg_base_quality: f64,
    /// Fraction of G/C bases, 0 when the read has no sequence
    pub gc_content: f64,
    /// Value of the `NM` tag; `None` when the tag is absent (distinct from zero)
    pub num_mismatches: Option<u32>,
    /// Reference sequence name
    pub chromosome: String,
    /// 0-based alignment start
    pub start: u64,
    /// 0-based exclusive alignment end, when known
    pub end: Option<u64>,
    /// Whether the aligned span intersects a region of interest
    pub overlap: bool,
}

impl ReadMetric {
    /// The span used for overlap queries.
    ///
    /// When the alignment end is unknown the read is treated as the single base
    /// `[start, start + 1)`.
    #[must_use]
    pub fn query_span(&self) -> (u64, u64) {
        (self.start, self.end.unwrap_or(self.start + 1))
    }
}

/// Derives the metric record for `read`, or the reason it is excluded.
///
/// # Errors
///
/// Returns [`ReadStatsError::MissingCoordinates`] if the read is mapped and primary/supplementary
/// but has no reference name or no alignment start.
pub fn extract(read: &AlignedRead) -> Result<Extraction> {
    if read.is_unmapped {
        return Ok(Extraction::Excluded(ExclusionReason::Unmapped));
    }
    if read.is_secondary {
        return Ok(Extraction::Excluded(ExclusionReason::Secondary));
    }

    let chromosome = read.reference_name.clone().ok_or_else(|| {
        ReadStatsError::MissingCoordinates {
            read_id: read.read_id.clone(),
            field: "reference sequence",
        }
    })?;
    let start = read.start.ok_or_else(|| ReadStatsError::MissingCoordinates {
        read_id: read.read_id.clone(),
        field: "alignment start",
    })?;

    Ok(Extraction::Metric(ReadMetric {
        read_id: read.read_id.clone(),
        fragment_length: u64::from(read.template_length.unsigned_abs()),
        avg_base_quality: mean_quality(&read.qualities),
        gc_content: gc_fraction(&read.sequence),
        num_mismatches: read.mismatches,
        chromosome,
        start,
        end: read.end,
        overlap: false,
    }))
}

/// Mean of the quality values, 0 for an empty slice.
#[must_use]
pub fn mean_quality(qualities: &[u8]) -> f64 {
    if qualities.is_empty() {
        return 0.0;
    }
    let sum: u64 = qualities.iter().map(|&q| u64::from(q)).sum();
    sum as f64 / qualities.len() as f64
}

/// Fraction of bases that are G or C (either case), 0 for an empty sequence.
///
/// The denominator is the full sequence length, including `N` and other symbols.
#[must_use]
pub fn gc_fraction(sequence: &[u8]) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence.iter().filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C')).count();
    gc as f64 / sequence.len() as f64
}
