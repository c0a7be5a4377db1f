//! End-to-end tests that run the `readstats` binary.

use readstats_lib::report::{
    FRAGMENT_LENGTH_HISTOGRAM, GC_CONTENT_HISTOGRAM, MISMATCH_HISTOGRAM, READ_TABLE_HTML,
    READ_TABLE_TSV, SUMMARY_HTML, SUMMARY_TSV,
};
use readstats_lib::sam::builder::RecordBuilder;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use crate::helpers::{
    assert_overlap_column, mapped_read, read_tsv, scenario_records, tsv_column, write_bed,
    write_test_bam,
};

/// Runs `readstats` and returns the output directory on success.
fn run_readstats(bam: &Path, bed: Option<&Path>, output: &Path, threads: usize) -> PathBuf {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_readstats"));
    cmd.arg("--bam").arg(bam).arg("--output").arg(output).arg("--threads").arg(threads.to_string());
    if let Some(bed) = bed {
        cmd.arg("--bed").arg(bed);
    }
    let status = cmd.status().expect("Failed to run readstats");
    assert!(status.success(), "readstats failed with {status}");
    output.to_path_buf()
}

#[test]
fn test_scenario_overlap() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &["chr1\t350\t360"]);

    let out = run_readstats(&bam, Some(&bed), &dir.path().join("out"), 1);

    assert_eq!(tsv_column(&out.join(READ_TABLE_TSV), "ReadID"), vec!["R1", "R2", "R3"]);
    assert_overlap_column(&out.join(READ_TABLE_TSV), &["0", "1", "0"]);
}

#[test]
fn test_no_bed_marks_nothing_overlapping() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());

    let out = run_readstats(&bam, None, &dir.path().join("out"), 1);

    assert_overlap_column(&out.join(READ_TABLE_TSV), &["0", "0", "0"]);
}

#[test]
fn test_header_only_bed_marks_nothing_overlapping() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &["track name=empty", "# nothing here"]);

    let out = run_readstats(&bam, Some(&bed), &dir.path().join("out"), 1);

    assert_overlap_column(&out.join(READ_TABLE_TSV), &["0", "0", "0"]);
}

#[test]
fn test_gzipped_bed() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed.gz");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &["chr1\t150\t160\tfirst", "chr2\t590\t700\tlast"]);

    let out = run_readstats(&bam, Some(&bed), &dir.path().join("out"), 1);

    assert_overlap_column(&out.join(READ_TABLE_TSV), &["1", "0", "1"]);
}

#[rstest]
#[case::touching_left("chr1\t200\t300", &["0", "0", "0"])]
#[case::one_base_inside("chr1\t199\t200", &["1", "0", "0"])]
#[case::zero_length("chr1\t150\t150", &["0", "0", "0"])]
#[case::other_chromosome("chr3\t0\t10000", &["0", "0", "0"])]
fn test_overlap_boundaries(#[case] bed_line: &str, #[case] expected: &[&str]) {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &[bed_line]);

    let out = run_readstats(&bam, Some(&bed), &dir.path().join("out"), 1);

    assert_overlap_column(&out.join(READ_TABLE_TSV), expected);
}

#[test]
fn test_mismatch_column_distinguishes_missing_from_zero() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());

    let out = run_readstats(&bam, None, &dir.path().join("out"), 1);

    assert_eq!(tsv_column(&out.join(READ_TABLE_TSV), "NumMismatches"), vec!["0", "3", ""]);
}

#[test]
fn test_unmapped_and_secondary_reads_are_excluded() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let mut records = scenario_records();
    records.push(RecordBuilder::new().name("U1").sequence("ACGTACGT").unmapped(true).build());
    records.push(mapped_read("S1", 0, 100).secondary(true).build());
    write_test_bam(&bam, &records);

    let out = run_readstats(&bam, None, &dir.path().join("out"), 1);

    assert_eq!(tsv_column(&out.join(READ_TABLE_TSV), "ReadID"), vec!["R1", "R2", "R3"]);
    assert_eq!(tsv_column(&out.join(SUMMARY_TSV), "total_reads"), vec!["3"]);
}

#[test]
fn test_supplementary_alignment_gets_a_row() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    let mut records = scenario_records();
    records.push(mapped_read("P1", 1, 2000).supplementary(true).tag("NM", 2i32).build());
    write_test_bam(&bam, &records);
    write_bed(&bed, &["chr2\t2050\t2051"]);

    let out = run_readstats(&bam, Some(&bed), &dir.path().join("out"), 1);

    assert_eq!(tsv_column(&out.join(READ_TABLE_TSV), "ReadID"), vec!["R1", "R2", "R3", "P1"]);
    assert_overlap_column(&out.join(READ_TABLE_TSV), &["0", "0", "0", "1"]);
}

#[test]
fn test_all_reports_written() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());

    let out = run_readstats(&bam, None, &dir.path().join("nested").join("out"), 1);

    for file in [
        READ_TABLE_TSV,
        READ_TABLE_HTML,
        SUMMARY_HTML,
        SUMMARY_TSV,
        FRAGMENT_LENGTH_HISTOGRAM,
        GC_CONTENT_HISTOGRAM,
        MISMATCH_HISTOGRAM,
    ] {
        assert!(out.join(file).is_file(), "missing {file}");
    }

    let html = fs::read_to_string(out.join(READ_TABLE_HTML)).unwrap();
    assert!(html.starts_with("<html><head><title>Read Stats</title></head><body>"));
    assert!(html.contains("<td>R2</td>"));
}

#[test]
fn test_histograms() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());

    let out = run_readstats(&bam, None, &dir.path().join("out"), 1);

    // Every scenario read has a 200 bp template.
    let (_, rows) = read_tsv(&out.join(FRAGMENT_LENGTH_HISTOGRAM));
    let bin = rows.iter().find(|row| row[0] == "200-250").expect("200-250 bin");
    assert_eq!(bin[1], "3");
    assert_eq!(bin[2], "100.00");

    // R3 has no NM tag and is left out of the mismatch histogram.
    let (_, rows) = read_tsv(&out.join(MISMATCH_HISTOGRAM));
    let total: u64 = rows.iter().map(|row| row[1].parse::<u64>().unwrap()).sum();
    assert_eq!(total, 2);
    assert_eq!(tsv_column(&out.join(SUMMARY_TSV), "reads_without_mismatch_tag"), vec!["1"]);
}

#[test]
fn test_threads_produce_identical_output() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    let records: Vec<_> = (0..500)
        .map(|i| mapped_read(&format!("q{i:04}"), i % 2, (i * 13) % 9_000).tag("NM", 1i32).build())
        .collect();
    write_test_bam(&bam, &records);
    write_bed(&bed, &["chr1\t1000\t2000", "chr2\t4000\t4500", "chr1\t8000\t8100"]);

    let single = run_readstats(&bam, Some(&bed), &dir.path().join("single"), 1);
    let multi = run_readstats(&bam, Some(&bed), &dir.path().join("multi"), 4);

    for file in [READ_TABLE_TSV, READ_TABLE_HTML, SUMMARY_TSV, FRAGMENT_LENGTH_HISTOGRAM] {
        assert_eq!(
            fs::read_to_string(single.join(file)).unwrap(),
            fs::read_to_string(multi.join(file)).unwrap(),
            "{file} differs between thread counts"
        );
    }
}

#[test]
fn test_empty_bam_gives_empty_table() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &[]);

    let out = run_readstats(&bam, None, &dir.path().join("out"), 1);

    assert_eq!(fs::read_to_string(out.join(READ_TABLE_TSV)).unwrap(), "");
    assert_eq!(tsv_column(&out.join(SUMMARY_TSV), "total_reads"), vec!["0"]);
}
