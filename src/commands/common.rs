//! Common CLI options.
//!
//! Argument groups composed into command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use readstats_lib::annotate::DEFAULT_BATCH_SIZE;
use readstats_lib::validation::{validate_file_exists, validate_output_dir, validate_positive};

/// Input sources: the alignments and, optionally, the regions of interest.
#[derive(Debug, Clone, Args)]
pub struct InputOptions {
    /// Input BAM file
    #[arg(short = 'b', long = "bam")]
    pub bam: PathBuf,

    /// BED file of regions of interest (plain or gzipped). Without it, no read overlaps.
    #[arg(short = 'r', long = "bed")]
    pub bed: Option<PathBuf>,
}

impl InputOptions {
    /// Validates that the BAM (and the BED, if given) exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.bam, "BAM")?;
        if let Some(bed) = &self.bed {
            validate_file_exists(bed, "BED")?;
        }
        Ok(())
    }
}

/// Output location.
#[derive(Debug, Clone, Args)]
pub struct OutputOptions {
    /// Output directory for reports; created if it does not exist
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl OutputOptions {
    /// Validates that the output path is usable as a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path exists and is not a directory.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_output_dir(&self.output)?;
        Ok(())
    }
}

/// Threading options.
///
/// `--threads N` sets both the BGZF decompression workers and the size of the pool that
/// computes per-read metrics. With one thread everything runs on the main thread.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of threads
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Reads handed to the thread pool at a time
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl ThreadingOptions {
    /// Returns true if more than one thread was requested.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.threads > 1
    }

    /// Validates that both values are at least 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` or `batch_size` is 0.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_positive(self.threads, "threads")?;
        validate_positive(self.batch_size, "batch-size")?;
        Ok(())
    }
}

impl Default for ThreadingOptions {
    fn default() -> Self {
        Self { threads: 1, batch_size: DEFAULT_BATCH_SIZE }
    }
}
