//! Utilities for generating test BAM and BED inputs programmatically.

use fgoxide::io::Io;
use noodles::sam::Header;
use noodles::sam::alignment::record_buf::RecordBuf;
use readstats_lib::sam::builder::{RecordBuilder, create_header, write_bam};
use std::io::Write;
use std::path::Path;

/// Header with `chr1` and `chr2`, 10 kb each.
pub fn create_test_header() -> Header {
    create_header(&[("chr1", 10_000), ("chr2", 10_000)])
}

/// A mapped 100 bp read on `ref_id` starting at 0-based `start`.
pub fn mapped_read(name: &str, ref_id: usize, start: usize) -> RecordBuilder {
    RecordBuilder::new()
        .name(name)
        .cigar("100M")
        .reference_sequence_id(ref_id)
        .alignment_start(start + 1)
        .template_length(200)
}

/// The three-read scenario: `R1 chr1:100-200`, `R2 chr1:300-400`, `R3 chr2:500-600`.
pub fn scenario_records() -> Vec<RecordBuf> {
    vec![
        mapped_read("R1", 0, 100).tag("NM", 0i32).build(),
        mapped_read("R2", 0, 300).tag("NM", 3i32).build(),
        mapped_read("R3", 1, 500).build(),
    ]
}

/// Writes `records` to `path` with the standard test header.
pub fn write_test_bam(path: &Path, records: &[RecordBuf]) {
    write_bam(path, &create_test_header(), records).expect("Failed to write test BAM");
}

/// Writes BED lines to `path`; gzip-compressed when the path ends in `.gz`.
pub fn write_bed(path: &Path, lines: &[&str]) {
    let mut writer = Io::default().new_writer(path).expect("Failed to create BED file");
    for line in lines {
        writeln!(writer, "{line}").expect("Failed to write BED line");
    }
    writer.flush().expect("Failed to flush BED file");
}
