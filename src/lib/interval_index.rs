//! Per-chromosome index answering "does anything overlap this span?" queries.
//!
//! Intervals are partitioned by chromosome and sorted by start. Alongside the sorted starts the
//! index keeps a running maximum of interval ends, so the stored intervals whose start lies
//! before a query's end form a prefix found by binary search, and the prefix maximum end tells
//! whether any of them reaches past the query's start. Each query is `O(log n)`.
//!
//! Overlap is half-open: `[a, b)` and `[c, d)` overlap iff `a < d` and `c < b`. Zero-length
//! intervals are kept (they count towards [`IntervalIndex::len`]) but never overlap anything,
//! and neither does a zero-length query.

use std::collections::HashMap;

use crate::intervals::Interval;

/// Sorted intervals of one chromosome.
#[derive(Debug, Clone, Default)]
struct ChromIntervals {
    /// Interval starts, ascending
    starts: Vec<u64>,
    /// `max_ends[i]` is the largest end among `starts[..=i]`, ignoring zero-length intervals
    max_ends: Vec<u64>,
}

impl ChromIntervals {
    fn build(mut spans: Vec<(u64, u64)>) -> Self {
        spans.sort_unstable();

        let mut starts = Vec::with_capacity(spans.len());
        let mut max_ends = Vec::with_capacity(spans.len());
        let mut running = 0;
        for (start, end) in spans {
            if end > start {
                running = running.max(end);
            }
            starts.push(start);
            max_ends.push(running);
        }

        Self { starts, max_ends }
    }

    fn overlaps(&self, start: u64, end: u64) -> bool {
        let candidates = self.starts.partition_point(|&s| s < end);
        candidates > 0 && self.max_ends[candidates - 1] > start
    }
}

/// Immutable overlap index over a set of intervals.
#[derive(Debug, Clone, Default)]
pub struct IntervalIndex {
    by_chrom: HashMap<String, ChromIntervals>,
    len: usize,
}

impl IntervalIndex {
    /// Builds the index. Input order does not matter.
    #[must_use]
    pub fn build(intervals: &[Interval]) -> Self {
        let mut spans: HashMap<String, Vec<(u64, u64)>> = HashMap::new();
        for interval in intervals {
            spans.entry(interval.chrom.clone()).or_default().push((interval.start, interval.end));
        }

        let by_chrom =
            spans.into_iter().map(|(chrom, spans)| (chrom, ChromIntervals::build(spans))).collect();
        Self { by_chrom, len: intervals.len() }
    }

    /// Returns true if any indexed interval on `chrom` overlaps `[start, end)`.
    ///
    /// A chromosome with no indexed intervals never overlaps.
    #[must_use]
    pub fn overlaps(&self, chrom: &str, start: u64, end: u64) -> bool {
        if start >= end {
            return false;
        }
        self.by_chrom.get(chrom).is_some_and(|c| c.overlaps(start, end))
    }

    /// Number of indexed intervals, including zero-length ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no intervals were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chromosomes with at least one interval.
    #[must_use]
    pub fn num_chromosomes(&self) -> usize {
        self.by_chrom.len()
    }
}
