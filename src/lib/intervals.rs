//! Regions of interest.
//!
//! An [`Interval`] is a 0-based, half-open span on a named chromosome. Intervals are loaded
//! from BED files with [`read_bed`]; plain and gzip-compressed (`.gz`) files are supported.
//! Blank lines and `#`, `track` and `browser` header lines are skipped. Only the first four
//! columns are read: chromosome, start, end, and an optional name.

use anyhow::{Context, Result};
use fgoxide::io::Io;
use std::io::BufRead;
use std::path::Path;

use crate::errors::ReadStatsError;

/// A half-open `[start, end)` span on a chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Chromosome (reference sequence) name
    pub chrom: String,
    /// 0-based inclusive start
    pub start: u64,
    /// 0-based exclusive end
    pub end: u64,
    /// Optional name (BED column 4)
    pub name: Option<String>,
}

impl Interval {
    /// Creates an unnamed interval.
    #[must_use]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self { chrom: chrom.into(), start, end, name: None }
    }

    /// Sets the interval name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Length in bases.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True for zero-length intervals, which never overlap anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` overlap iff `a < d` and `c < b`.
    #[must_use]
    pub fn overlaps(&self, chrom: &str, start: u64, end: u64) -> bool {
        !self.is_empty() && start < end && self.chrom == chrom && self.start < end && start < self.end
    }
}

/// Reads all intervals from a BED file.
///
/// An empty file yields no intervals; this is a valid "no regions" state.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if a data line has fewer than
/// three columns, non-integer coordinates, or an end before its start.
pub fn read_bed<P: AsRef<Path>>(path: P) -> Result<Vec<Interval>> {
    let path = path.as_ref();
    let reader = Io::default()
        .new_reader(path)
        .with_context(|| format!("Failed to open BED file: {}", path.display()))?;
    parse_bed(reader, path)
}

fn parse_bed<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Interval>> {
    let mut intervals = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read BED file: {}", path.display()))?;
        let line = line.trim_end();
        if is_header_or_blank(line) {
            continue;
        }
        let interval = parse_bed_line(line).map_err(|reason| ReadStatsError::InvalidFileFormat {
            file_type: "BED".to_string(),
            path: path.display().to_string(),
            reason: format!("line {}: {reason}", index + 1),
        })?;
        intervals.push(interval);
    }

    Ok(intervals)
}

fn is_header_or_blank(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

fn parse_bed_line(line: &str) -> std::result::Result<Interval, String> {
    let mut fields = line.split('\t');
    let (Some(chrom), Some(start), Some(end)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err("expected at least 3 tab-separated columns".to_string());
    };

    let start: u64 = start.trim().parse().map_err(|_| format!("invalid start '{start}'"))?;
    let end: u64 = end.trim().parse().map_err(|_| format!("invalid end '{end}'"))?;
    if end < start {
        return Err(format!("end {end} is before start {start}"));
    }

    let name = fields.next().filter(|n| !n.is_empty()).map(str::to_string);
    Ok(Interval { chrom: chrom.to_string(), start, end, name })
}
