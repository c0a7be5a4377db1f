//! Aligned-read input model.
//!
//! [`AlignedRead`] is the owned, format-independent view of one alignment record that the
//! metric extractor consumes. Alignment sources (see [`AlignmentSource`]) produce a lazy
//! stream of them; [`AlignedRead::from_record`] converts a noodles [`RecordBuf`] using the
//! SAM header to resolve the reference sequence name.
//!
//! Coordinates are 0-based, half-open. noodles reports 1-based, closed positions, so the
//! conversion subtracts one from the alignment start and keeps the alignment end as-is.

use anyhow::Result;
use noodles::sam::Header;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::alignment::record_buf::data::field::Value;

use crate::errors::ReadStatsError;

/// Placeholder used when a record carries no read name.
pub const UNNAMED_READ: &str = "*";

/// One aligned read, decoupled from any file format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedRead {
    /// Read (query) name
    pub read_id: String,
    /// Whether the read is flagged as unmapped
    pub is_unmapped: bool,
    /// Whether the record is a secondary alignment
    pub is_secondary: bool,
    /// Signed template length (TLEN)
    pub template_length: i32,
    /// Per-base Phred qualities (not ASCII-offset)
    pub qualities: Vec<u8>,
    /// Read bases as ASCII
    pub sequence: Vec<u8>,
    /// Value of the `NM` tag when present
    pub mismatches: Option<u32>,
    /// Reference sequence name
    pub reference_name: Option<String>,
    /// 0-based alignment start
    pub start: Option<u64>,
    /// 0-based exclusive alignment end; `None` when it cannot be determined
    pub end: Option<u64>,
}

impl AlignedRead {
    /// Builds an `AlignedRead` from a noodles record.
    ///
    /// The reference sequence id is resolved against `header`; an id with no matching
    /// reference sequence is an error. A record without CIGAR operations has no defined
    /// alignment end.
    ///
    /// # Errors
    ///
    /// Returns [`ReadStatsError::ReferenceNotFound`] if the record's reference sequence id is
    /// not present in the header.
    pub fn from_record(record: &RecordBuf, header: &Header) -> Result<Self> {
        let read_id = record.name().map_or_else(
            || UNNAMED_READ.to_string(),
            |n| String::from_utf8_lossy(n.as_ref()).into_owned(),
        );

        let reference_name = match record.reference_sequence_id() {
            Some(ref_id) => {
                let (name, _) = header
                    .reference_sequences()
                    .get_index(ref_id)
                    .ok_or_else(|| ReadStatsError::ReferenceNotFound {
                        read_id: read_id.clone(),
                        ref_id,
                    })?;
                Some(name.to_string())
            }
            None => None,
        };

        let start = record.alignment_start().map(|pos| usize::from(pos) as u64 - 1);
        let end = if record.cigar().as_ref().is_empty() {
            None
        } else {
            record.alignment_end().map(|pos| usize::from(pos) as u64)
        };

        let flags = record.flags();
        Ok(Self {
            read_id,
            is_unmapped: flags.is_unmapped(),
            is_secondary: flags.is_secondary(),
            template_length: record.template_length(),
            qualities: record.quality_scores().as_ref().to_vec(),
            sequence: record.sequence().as_ref().to_vec(),
            mismatches: mismatch_count(record),
            reference_name,
            start,
            end,
        })
    }
}

/// Reads the `NM` tag as a non-negative count.
///
/// Absent or negative values, and values of a non-integer type, yield `None`.
fn mismatch_count(record: &RecordBuf) -> Option<u32> {
    match record.data().get(&Tag::EDIT_DISTANCE)? {
        Value::Int8(v) => u32::try_from(*v).ok(),
        Value::UInt8(v) => Some(u32::from(*v)),
        Value::Int16(v) => u32::try_from(*v).ok(),
        Value::UInt16(v) => Some(u32::from(*v)),
        Value::Int32(v) => u32::try_from(*v).ok(),
        Value::UInt32(v) => Some(*v),
        _ => None,
    }
}

/// A source of aligned reads.
///
/// Opening the source is where resource errors surface (missing file, malformed header);
/// [`AlignmentSource::reads`] then yields records lazily in file order. Item errors are
/// decoding failures and are fatal to the run.
pub trait AlignmentSource {
    /// Human-readable description used in log and error messages.
    fn describe(&self) -> String;

    /// Returns the reads of this source in order.
    fn reads(&mut self) -> Box<dyn Iterator<Item = Result<AlignedRead>> + '_>;
}

/// An in-memory alignment source, mostly useful for tests and library callers that already
/// hold their reads.
#[derive(Debug, Clone, Default)]
pub struct VecAlignmentSource {
    reads: Vec<AlignedRead>,
}

impl VecAlignmentSource {
    /// Wraps a vector of reads.
    #[must_use]
    pub fn new(reads: Vec<AlignedRead>) -> Self {
        Self { reads }
    }
}

impl AlignmentSource for VecAlignmentSource {
    fn describe(&self) -> String {
        format!("{} in-memory reads", self.reads.len())
    }

    fn reads(&mut self) -> Box<dyn Iterator<Item = Result<AlignedRead>> + '_> {
        Box::new(self.reads.iter().cloned().map(Ok))
    }
}
