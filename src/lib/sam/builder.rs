//! Builders for creating test SAM/BAM records, headers and files.
//!
//! [`RecordBuilder`] creates individual noodles records with a fluent API; [`create_header`]
//! makes a header with the given reference sequences; [`write_bam`] writes both to disk.
//!
//! ```rust
//! use readstats_lib::sam::builder::RecordBuilder;
//!
//! let record = RecordBuilder::mapped_read()
//!     .name("read1")
//!     .sequence("ACGTACGT")
//!     .alignment_start(100)
//!     .tag("NM", 1i32)
//!     .build();
//!
//! assert_eq!(record.reference_sequence_id(), Some(0));
//! ```

use anyhow::{Context, Result};
use noodles::core::Position;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::data::field::Value as BufValue;
use noodles::sam::alignment::record_buf::{QualityScores, RecordBuf, Sequence};
use noodles::sam::header::record::value::Map;
use noodles::sam::header::record::value::map::ReferenceSequence;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;

/// Base quality used when a sequence is given without qualities.
pub const DEFAULT_BASE_QUALITY: u8 = 30;

/// Mapping quality given to every built record.
pub const DEFAULT_MAPPING_QUALITY: u8 = 60;

/// Builder for a single `RecordBuf`.
///
/// If only a sequence is set, the CIGAR is generated as `{len}M`; if only a CIGAR is set, a
/// sequence of matching length is generated. Qualities default to [`DEFAULT_BASE_QUALITY`].
#[derive(Debug, Default)]
pub struct RecordBuilder {
    name: Option<Vec<u8>>,
    flags: Flags,
    reference_sequence_id: Option<usize>,
    alignment_start: Option<usize>,
    cigar: Option<String>,
    sequence: Vec<u8>,
    qualities: Option<Vec<u8>>,
    tags: Vec<(Tag, BufValue)>,
    template_length: Option<i32>,
}

impl RecordBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for a read mapped to reference sequence 0.
    #[must_use]
    pub fn mapped_read() -> Self {
        Self { reference_sequence_id: Some(0), ..Self::new() }
    }

    /// Sets the read name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.as_bytes().to_vec());
        self
    }

    /// Sets the sequence.
    #[must_use]
    pub fn sequence(mut self, seq: &str) -> Self {
        self.sequence = seq.as_bytes().to_vec();
        self
    }

    /// Sets the Phred quality scores. An empty slice produces a record with no qualities.
    #[must_use]
    pub fn qualities(mut self, quals: &[u8]) -> Self {
        self.qualities = Some(quals.to_vec());
        self
    }

    /// Sets the unmapped flag.
    #[must_use]
    pub fn unmapped(mut self, unmapped: bool) -> Self {
        self.flags.set(Flags::UNMAPPED, unmapped);
        self
    }

    /// Sets the secondary alignment flag.
    #[must_use]
    pub fn secondary(mut self, secondary: bool) -> Self {
        self.flags.set(Flags::SECONDARY, secondary);
        self
    }

    /// Sets the supplementary alignment flag.
    #[must_use]
    pub fn supplementary(mut self, supplementary: bool) -> Self {
        self.flags.set(Flags::SUPPLEMENTARY, supplementary);
        self
    }

    /// Sets the reference sequence ID (0-based).
    #[must_use]
    pub fn reference_sequence_id(mut self, id: usize) -> Self {
        self.reference_sequence_id = Some(id);
        self
    }

    /// Sets the alignment start position (1-based).
    #[must_use]
    pub fn alignment_start(mut self, pos: usize) -> Self {
        self.alignment_start = Some(pos);
        self
    }

    /// Sets the CIGAR string.
    #[must_use]
    pub fn cigar(mut self, cigar: &str) -> Self {
        self.cigar = Some(cigar.to_string());
        self
    }

    /// Sets the template length (insert size).
    #[must_use]
    pub fn template_length(mut self, tlen: i32) -> Self {
        self.template_length = Some(tlen);
        self
    }

    /// Adds a SAM tag. Tags that are not exactly two characters are ignored.
    #[must_use]
    pub fn tag<V: Into<BufValue>>(mut self, tag: &str, value: V) -> Self {
        if let [a, b] = tag.as_bytes() {
            self.tags.push((Tag::from([*a, *b]), value.into()));
        }
        self
    }

    /// Builds the `RecordBuf`.
    ///
    /// # Panics
    ///
    /// Panics if the alignment start is zero or the CIGAR string is malformed.
    #[must_use]
    pub fn build(self) -> RecordBuf {
        let mut record = RecordBuf::default();

        if let Some(name) = self.name {
            *record.name_mut() = Some(name.into());
        }
        *record.flags_mut() = self.flags;
        *record.reference_sequence_id_mut() = self.reference_sequence_id;
        if let Some(pos) = self.alignment_start {
            *record.alignment_start_mut() =
                Some(Position::try_from(pos).expect("alignment_start must be >= 1"));
        }
        *record.mapping_quality_mut() = MappingQuality::new(DEFAULT_MAPPING_QUALITY);
        if let Some(tlen) = self.template_length {
            *record.template_length_mut() = tlen;
        }

        let (cigar, sequence) = match (self.cigar, self.sequence.is_empty()) {
            (Some(cigar), true) => {
                let generated = b"ACGT".iter().copied().cycle().take(cigar_seq_len(&cigar)).collect();
                (cigar, generated)
            }
            (Some(cigar), false) => (cigar, self.sequence),
            (None, false) => (format!("{}M", self.sequence.len()), self.sequence),
            (None, true) => (String::new(), Vec::new()),
        };

        if !cigar.is_empty() {
            *record.cigar_mut() = parse_cigar(&cigar).into_iter().collect();
        }

        let qualities =
            self.qualities.unwrap_or_else(|| vec![DEFAULT_BASE_QUALITY; sequence.len()]);
        *record.sequence_mut() = Sequence::from(sequence);
        *record.quality_scores_mut() = QualityScores::from(qualities);

        for (tag, value) in self.tags {
            record.data_mut().insert(tag, value);
        }

        record
    }
}

/// Parses a CIGAR string into a vector of operations.
///
/// # Panics
///
/// Panics if the CIGAR string contains invalid characters or formatting.
#[must_use]
pub fn parse_cigar(cigar: &str) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut len = String::new();

    for c in cigar.chars() {
        if c.is_ascii_digit() {
            len.push(c);
            continue;
        }
        let kind = match c {
            'M' => Kind::Match,
            'I' => Kind::Insertion,
            'D' => Kind::Deletion,
            'N' => Kind::Skip,
            'S' => Kind::SoftClip,
            'H' => Kind::HardClip,
            'P' => Kind::Pad,
            '=' => Kind::SequenceMatch,
            'X' => Kind::SequenceMismatch,
            _ => panic!("Unknown CIGAR operation: {c}"),
        };
        ops.push(Op::new(kind, len.parse().expect("Invalid CIGAR: expected number")));
        len.clear();
    }

    ops
}

/// Number of read bases consumed by a CIGAR string.
#[must_use]
pub fn cigar_seq_len(cigar: &str) -> usize {
    parse_cigar(cigar)
        .iter()
        .filter(|op| {
            matches!(
                op.kind(),
                Kind::Match
                    | Kind::Insertion
                    | Kind::SoftClip
                    | Kind::SequenceMatch
                    | Kind::SequenceMismatch
            )
        })
        .map(|op| op.len())
        .sum()
}

/// Creates a header with the given `(name, length)` reference sequences, in order.
///
/// # Panics
///
/// Panics if any reference length is zero.
#[must_use]
pub fn create_header(references: &[(&str, usize)]) -> Header {
    references
        .iter()
        .fold(Header::builder(), |builder, (name, length)| {
            let map = Map::<ReferenceSequence>::new(
                NonZeroUsize::new(*length).expect("reference length must be non-zero"),
            );
            builder.add_reference_sequence(*name, map)
        })
        .build()
}

/// Writes `records` to a BAM file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_bam<P: AsRef<Path>>(path: P, header: &Header, records: &[RecordBuf]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create BAM file: {}", path.display()))?;
    let mut writer = noodles::bam::io::Writer::new(file);
    writer.write_header(header)?;
    for record in records {
        writer.write_alignment_record(header, record)?;
    }
    writer.finish(header)?;
    Ok(())
}
