//! Overlap annotation of the read metric table.
//!
//! [`OverlapAnnotator`] drives the metric extractor over a stream of reads and marks each
//! resulting [`ReadMetric`] with whether its aligned span intersects a region of interest.
//! The output keeps the relative order of the input stream, in both the sequential and the
//! batched parallel path.
//!
//! When no regions are supplied (or the region set is empty) no index is built and every
//! metric keeps `overlap = false`.
//!
//! Per-read diagnostics go through a [`ReadObserver`] passed by the caller rather than a
//! global sink, so library callers decide what to log or count.

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::alignment::AlignedRead;
use crate::errors::ReadStatsError;
use crate::interval_index::IntervalIndex;
use crate::intervals::Interval;
use crate::read_metric::{ExclusionReason, Extraction, ReadMetric, extract};

/// Default number of reads handed to the thread pool at once.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Receives per-read events from the annotator.
///
/// Events are delivered on the calling thread in input order, also by the parallel path.
/// Both methods default to doing nothing.
pub trait ReadObserver {
    /// Called for each read excluded from the table.
    fn excluded(&self, _read: &AlignedRead, _reason: ExclusionReason) {}

    /// Called once for the read whose integrity check aborts the run.
    fn failed(&self, _read_id: &str, _error: &ReadStatsError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ReadObserver for SilentObserver {}

/// Observer that logs exclusions and failures at debug level.
///
/// The failing read's error is also the run's error, so it is not logged at error level here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl ReadObserver for LoggingObserver {
    fn excluded(&self, read: &AlignedRead, reason: ExclusionReason) {
        debug!("Excluding read '{}': {reason}", read.read_id);
    }

    fn failed(&self, read_id: &str, error: &ReadStatsError) {
        debug!("Invalid read '{read_id}': {error}");
    }
}

/// Thread-safe tally of excluded reads by reason.
#[derive(Debug, Default)]
pub struct ExclusionCounter {
    unmapped: AtomicU64,
    secondary: AtomicU64,
}

impl ExclusionCounter {
    /// Creates a counter with all counts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unmapped reads seen.
    #[must_use]
    pub fn unmapped(&self) -> u64 {
        self.unmapped.load(Ordering::Relaxed)
    }

    /// Number of secondary alignments seen.
    #[must_use]
    pub fn secondary(&self) -> u64 {
        self.secondary.load(Ordering::Relaxed)
    }

    /// Total excluded reads.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.unmapped() + self.secondary()
    }
}

impl ReadObserver for ExclusionCounter {
    fn excluded(&self, _read: &AlignedRead, reason: ExclusionReason) {
        let counter = match reason {
            ExclusionReason::Unmapped => &self.unmapped,
            ExclusionReason::Secondary => &self.secondary,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Forwards every event to two observers, first then second.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObserverChain<A, B>(pub A, pub B);

impl<A: ReadObserver, B: ReadObserver> ReadObserver for ObserverChain<A, B> {
    fn excluded(&self, read: &AlignedRead, reason: ExclusionReason) {
        self.0.excluded(read, reason);
        self.1.excluded(read, reason);
    }

    fn failed(&self, read_id: &str, error: &ReadStatsError) {
        self.0.failed(read_id, error);
        self.1.failed(read_id, error);
    }
}

impl<O: ReadObserver + ?Sized> ReadObserver for &O {
    fn excluded(&self, read: &AlignedRead, reason: ExclusionReason) {
        (**self).excluded(read, reason);
    }

    fn failed(&self, read_id: &str, error: &ReadStatsError) {
        (**self).failed(read_id, error);
    }
}

/// Extracts metrics from reads and sets their overlap flag.
#[derive(Debug, Clone, Default)]
pub struct OverlapAnnotator {
    index: Option<IntervalIndex>,
}

impl OverlapAnnotator {
    /// Creates an annotator for the given regions.
    ///
    /// `None` and an empty slice both mean "no overlap computation": no index is built.
    #[must_use]
    pub fn new(intervals: Option<&[Interval]>) -> Self {
        match intervals {
            Some(intervals) if !intervals.is_empty() => {
                let index = IntervalIndex::build(intervals);
                info!(
                    "Indexed {} regions across {} chromosomes",
                    index.len(),
                    index.num_chromosomes()
                );
                Self { index: Some(index) }
            }
            _ => {
                info!("No regions supplied; skipping overlap computation");
                Self { index: None }
            }
        }
    }

    /// True if overlaps are computed against a region index.
    #[must_use]
    pub fn has_regions(&self) -> bool {
        self.index.is_some()
    }

    /// Runs one read through extraction and annotation.
    ///
    /// Returns `Ok(None)` for excluded reads after notifying the observer.
    ///
    /// # Errors
    ///
    /// Returns the extractor's integrity error for mapped reads without coordinates.
    pub fn process<O: ReadObserver + ?Sized>(
        &self,
        read: &AlignedRead,
        observer: &O,
    ) -> std::result::Result<Option<ReadMetric>, ReadStatsError> {
        notify(read, self.evaluate(read), observer)
    }

    /// Extraction plus overlap flag. Never touches an observer.
    fn evaluate(&self, read: &AlignedRead) -> std::result::Result<Extraction, ReadStatsError> {
        let mut extraction = extract(read)?;
        if let (Extraction::Metric(metric), Some(index)) = (&mut extraction, &self.index) {
            let (start, end) = metric.query_span();
            metric.overlap = index.overlaps(&metric.chromosome, start, end);
        }
        Ok(extraction)
    }

    /// Annotates a stream of reads on the current thread.
    ///
    /// # Errors
    ///
    /// Stops at the first read the source fails to produce or that fails its integrity check.
    pub fn annotate<I, O>(&self, reads: I, observer: &O) -> Result<Vec<ReadMetric>>
    where
        I: IntoIterator<Item = Result<AlignedRead>>,
        O: ReadObserver + ?Sized,
    {
        let mut metrics = Vec::new();
        for read in reads {
            if let Some(metric) = self.process(&read?, observer)? {
                metrics.push(metric);
            }
        }
        Ok(metrics)
    }

    /// Annotates a stream of reads in batches on a dedicated rayon pool.
    ///
    /// Reads are pulled `batch_size` at a time; each batch is evaluated in parallel, then the
    /// observer is notified and results appended in input order on the calling thread. Output
    /// and observer events therefore equal those of [`Self::annotate`]: events stop at the
    /// first failing read. `threads <= 1` falls back to the sequential path.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built, the source fails, or a read fails its
    /// integrity check. Within a batch the earliest failing read is reported.
    pub fn annotate_parallel<I, O>(
        &self,
        reads: I,
        observer: &O,
        threads: usize,
        batch_size: usize,
    ) -> Result<Vec<ReadMetric>>
    where
        I: IntoIterator<Item = Result<AlignedRead>>,
        O: ReadObserver + ?Sized,
    {
        if threads <= 1 {
            return self.annotate(reads, observer);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build rayon thread pool")?;

        let batch_size = batch_size.max(1);
        let mut reads = reads.into_iter();
        let mut batch: Vec<AlignedRead> = Vec::with_capacity(batch_size);
        let mut metrics = Vec::new();

        loop {
            batch.clear();
            for read in reads.by_ref().take(batch_size) {
                batch.push(read?);
            }
            if batch.is_empty() {
                break;
            }

            let outcomes: Vec<_> =
                pool.install(|| batch.par_iter().map(|read| self.evaluate(read)).collect());
            for (read, outcome) in batch.iter().zip(outcomes) {
                if let Some(metric) = notify(read, outcome, observer)? {
                    metrics.push(metric);
                }
            }
        }

        Ok(metrics)
    }
}

/// Reports an evaluated read to `observer` and unwraps it into an optional table row.
fn notify<O: ReadObserver + ?Sized>(
    read: &AlignedRead,
    outcome: std::result::Result<Extraction, ReadStatsError>,
    observer: &O,
) -> std::result::Result<Option<ReadMetric>, ReadStatsError> {
    match outcome {
        Ok(Extraction::Metric(metric)) => Ok(Some(metric)),
        Ok(Extraction::Excluded(reason)) => {
            observer.excluded(read, reason);
            Ok(None)
        }
        Err(e) => {
            observer.failed(&read.read_id, &e);
            Err(e)
        }
    }
}

/// Builds the annotated metric table for `reads`, one row per qualifying read in input order.
///
/// # Errors
///
/// Returns the first integrity error raised by the extractor.
pub fn annotate(
    reads: &[AlignedRead],
    intervals: Option<&[Interval]>,
) -> std::result::Result<Vec<ReadMetric>, ReadStatsError> {
    let annotator = OverlapAnnotator::new(intervals);
    reads.iter().filter_map(|read| annotator.process(read, &SilentObserver).transpose()).collect()
}
