//! BAM file input.
//!
//! BAM files use BGZF compression, which can be decompressed on worker threads:
//!
//! - **Single-threaded**: Use `threads=1` (lower overhead, good for small files)
//! - **Multi-threaded**: Use `threads>1` (higher throughput for large files)
//!
//! [`BamAlignmentSource`] adapts an opened BAM file to the [`AlignmentSource`] contract, so
//! open-time failures (missing file, bad header) surface from [`BamAlignmentSource::open`]
//! and record decoding failures surface lazily from the read stream.

use anyhow::{Context, Result};
use noodles::bgzf::io::{MultithreadedReader, Reader as BgzfReader};
use noodles::sam::Header;
use std::fs::File;
use std::io::{self, BufRead, Read};
use std::num::NonZero;
use std::path::{Path, PathBuf};

use crate::alignment::{AlignedRead, AlignmentSource};

/// Enum wrapping single-threaded and multi-threaded BGZF readers.
pub enum BgzfReaderEnum {
    /// Single-threaded BGZF reader (lower overhead for small files)
    SingleThreaded(BgzfReader<File>),
    /// Multi-threaded BGZF reader (noodles built-in threading)
    MultiThreaded(MultithreadedReader<File>),
}

impl Read for BgzfReaderEnum {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.read(buf),
            BgzfReaderEnum::MultiThreaded(r) => r.read(buf),
        }
    }
}

impl BufRead for BgzfReaderEnum {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.fill_buf(),
            BgzfReaderEnum::MultiThreaded(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.consume(amt),
            BgzfReaderEnum::MultiThreaded(r) => r.consume(amt),
        }
    }
}

/// A BAM reader over either kind of BGZF reader.
pub type BamReaderAuto = noodles::bam::io::Reader<BgzfReaderEnum>;

/// Opens a BAM file and reads its header.
///
/// # Arguments
/// * `path` - Path to the input BAM file
/// * `threads` - Number of threads for BGZF decompression (1 = single-threaded)
///
/// # Errors
/// Returns an error if the file cannot be opened or the header cannot be read
///
/// # Example
/// ```no_run
/// use readstats_lib::bam_io::create_bam_reader;
/// use std::path::Path;
///
/// let (mut reader, header) = create_bam_reader(Path::new("input.bam"), 4).unwrap();
/// ```
pub fn create_bam_reader<P: AsRef<Path>>(
    path: P,
    threads: usize,
) -> Result<(BamReaderAuto, Header)> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open input BAM: {}", path_ref.display()))?;

    let bgzf_reader = match NonZero::new(threads) {
        Some(worker_count) if threads > 1 => {
            BgzfReaderEnum::MultiThreaded(MultithreadedReader::with_worker_count(worker_count, file))
        }
        _ => BgzfReaderEnum::SingleThreaded(BgzfReader::new(file)),
    };

    let mut reader = noodles::bam::io::Reader::from(bgzf_reader);
    let header = reader
        .read_header()
        .with_context(|| format!("Failed to read header from: {}", path_ref.display()))?;

    Ok((reader, header))
}

/// An [`AlignmentSource`] backed by a BAM file.
pub struct BamAlignmentSource {
    path: PathBuf,
    reader: BamReaderAuto,
    header: Header,
}

impl BamAlignmentSource {
    /// Opens `path` and reads its header.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header is malformed.
    pub fn open<P: AsRef<Path>>(path: P, threads: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (reader, header) = create_bam_reader(&path, threads)?;
        Ok(Self { path, reader, header })
    }

    /// The SAM header of the opened file.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl AlignmentSource for BamAlignmentSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn reads(&mut self) -> Box<dyn Iterator<Item = Result<AlignedRead>> + '_> {
        let Self { path, reader, header } = self;
        let header: &Header = header;
        let path: &Path = path;
        Box::new(reader.record_bufs(header).map(move |result| {
            let record = result
                .with_context(|| format!("Failed to read BAM record from: {}", path.display()))?;
            AlignedRead::from_record(&record, header)
        }))
    }
}
