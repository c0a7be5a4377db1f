//! Compute per-read metrics from a BAM file and annotate overlap with regions of interest.
//!
//! The whole metric table is built and summarized before anything is written, so a failed
//! run leaves no partial reports behind.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::fs;

use readstats_lib::aggregate::aggregate;
use readstats_lib::alignment::AlignmentSource;
use readstats_lib::annotate::{ExclusionCounter, LoggingObserver, ObserverChain, OverlapAnnotator};
use readstats_lib::bam_io::BamAlignmentSource;
use readstats_lib::intervals::read_bed;
use readstats_lib::logging::{OperationTimer, format_count, log_summary};
use readstats_lib::progress::ProgressTracker;
use readstats_lib::report::write_reports;

use crate::commands::command::Command;
use crate::commands::common::{InputOptions, OutputOptions, ThreadingOptions};

/// Compute read statistics from a BAM file.
#[derive(Debug, Parser)]
#[command(
    name = "readstats",
    version,
    styles = crate::STYLES,
    about = "Compute per-read statistics from a BAM file",
    long_about = r#"
Compute per-read statistics from a BAM file and flag reads overlapping regions of interest.

For every mapped, non-secondary read the fragment length, mean base quality, GC content and
NM-tag mismatch count are computed. If a BED file is given, each read is marked with whether its
aligned span overlaps any region (half-open coordinates; touching intervals do not overlap).

Outputs written to the output directory:
  output.tsv                      one row per read
  output.html                     the same table as a plain HTML page
  summary.html                    headline numbers and distributions
  summary.tsv                     headline numbers
  fragment_length_histogram.tsv   fragment length distribution
  gc_content_histogram.tsv        GC content distribution
  mismatch_histogram.tsv          mismatch count distribution

Example usage:
  readstats --bam sample.bam --output reports/
  readstats --bam sample.bam --bed targets.bed.gz --output reports/ --threads 4
"#
)]
pub struct ReadStats {
    /// Input options
    #[command(flatten)]
    pub input: InputOptions,

    /// Output options
    #[command(flatten)]
    pub output: OutputOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Command for ReadStats {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.input.validate()?;
        self.output.validate()?;
        self.threading.validate()?;

        debug!("Command line: {command_line}");
        info!("Input BAM: {}", self.input.bam.display());
        if let Some(bed) = &self.input.bed {
            info!("Regions: {}", bed.display());
        }
        info!("Output directory: {}", self.output.output.display());
        if self.threading.is_parallel() {
            info!(
                "Threads: {} (batch size {})",
                self.threading.threads,
                format_count(self.threading.batch_size as u64)
            );
        } else {
            info!("Threads: 1");
        }

        let regions = match &self.input.bed {
            Some(bed) => {
                let regions = read_bed(bed)?;
                info!("Loaded {} regions from {}", format_count(regions.len() as u64), bed.display());
                Some(regions)
            }
            None => None,
        };
        let annotator = OverlapAnnotator::new(regions.as_deref());

        let mut source = BamAlignmentSource::open(&self.input.bam, self.threading.threads)?;
        info!("Opened BAM file: {}", source.describe());

        let counter = ExclusionCounter::new();
        let observer = ObserverChain(LoggingObserver, &counter);
        let progress = ProgressTracker::new("Processed reads");
        let timer = OperationTimer::new("Computing read metrics");

        let reads = source.reads().inspect(|_| {
            progress.record(1);
        });
        let metrics = annotator.annotate_parallel(
            reads,
            &observer,
            self.threading.threads,
            self.threading.batch_size,
        )?;
        progress.log_final();
        timer.log_completion(progress.count());

        let summary = aggregate(&metrics);

        fs::create_dir_all(&self.output.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.output.display())
        })?;
        let written = write_reports(&self.output.output, &metrics, &summary)?;

        log_summary(&summary, counter.unmapped(), counter.secondary());
        for path in written {
            info!("Wrote {}", path.display());
        }
        Ok(())
    }
}
