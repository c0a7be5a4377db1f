//! Tests that drive the library from a BAM on disk to the written reports.

use approx::assert_relative_eq;
use readstats_lib::aggregate::aggregate;
use readstats_lib::alignment::AlignmentSource;
use readstats_lib::annotate::{ExclusionCounter, OverlapAnnotator, SilentObserver, annotate};
use readstats_lib::bam_io::BamAlignmentSource;
use readstats_lib::intervals::read_bed;
use readstats_lib::report::{READ_TABLE_TSV, write_reports};
use readstats_lib::sam::builder::RecordBuilder;
use tempfile::TempDir;

use crate::helpers::{assert_overlap_column, mapped_read, scenario_records, write_bed, write_test_bam};

#[test]
fn test_bam_source_reads_in_file_order() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());

    let mut source = BamAlignmentSource::open(&bam, 1).unwrap();
    let reads: Vec<_> = source.reads().collect::<anyhow::Result<_>>().unwrap();

    let ids: Vec<_> = reads.iter().map(|r| r.read_id.as_str()).collect();
    assert_eq!(ids, vec!["R1", "R2", "R3"]);
    assert_eq!(reads[0].reference_name.as_deref(), Some("chr1"));
    assert_eq!(reads[0].start, Some(100));
    assert_eq!(reads[0].end, Some(200));
    assert_eq!(reads[2].reference_name.as_deref(), Some("chr2"));
    assert_eq!(reads[2].mismatches, None);
}

#[test]
fn test_pipeline_from_files() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &["chr1\t350\t360\tsite"]);

    let regions = read_bed(&bed).unwrap();
    let mut source = BamAlignmentSource::open(&bam, 1).unwrap();
    let reads: Vec<_> = source.reads().collect::<anyhow::Result<_>>().unwrap();
    let metrics = annotate(&reads, Some(regions.as_slice())).unwrap();
    let summary = aggregate(&metrics);

    assert_eq!(summary.total_reads, 3);
    assert_eq!(summary.overlapping_reads, 1);
    assert_relative_eq!(summary.overlap_fraction(), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(summary.mean_avg_base_quality, 30.0);

    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    let written = write_reports(&out, &metrics, &summary).unwrap();
    assert_eq!(written.len(), 7);
    assert_overlap_column(&out.join(READ_TABLE_TSV), &["0", "1", "0"]);
}

#[test]
fn test_streaming_annotation_counts_exclusions() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let mut records = scenario_records();
    records.push(RecordBuilder::new().name("U1").sequence("ACGT").unmapped(true).build());
    records.push(mapped_read("S1", 1, 10).secondary(true).build());
    records.push(mapped_read("S2", 0, 20).secondary(true).build());
    write_test_bam(&bam, &records);

    let mut source = BamAlignmentSource::open(&bam, 2).unwrap();
    let counter = ExclusionCounter::new();
    let annotator = OverlapAnnotator::new(None);
    let metrics = annotator.annotate_parallel(source.reads(), &counter, 2, 2).unwrap();

    assert_eq!(metrics.len(), 3);
    assert_eq!(counter.unmapped(), 1);
    assert_eq!(counter.secondary(), 2);
    assert_eq!(counter.total(), 3);
}

#[test]
fn test_sequential_and_parallel_agree_on_file() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    let records: Vec<_> = (0..200)
        .map(|i| mapped_read(&format!("q{i:03}"), i % 2, (i * 37) % 9_000).build())
        .collect();
    write_test_bam(&bam, &records);
    write_bed(&bed, &["chr1\t0\t500", "chr2\t3000\t3500"]);

    let regions = read_bed(&bed).unwrap();
    let annotator = OverlapAnnotator::new(Some(regions.as_slice()));

    let mut source = BamAlignmentSource::open(&bam, 1).unwrap();
    let sequential = annotator.annotate(source.reads(), &SilentObserver).unwrap();
    let mut source = BamAlignmentSource::open(&bam, 1).unwrap();
    let parallel = annotator.annotate_parallel(source.reads(), &SilentObserver, 4, 16).unwrap();

    assert_eq!(sequential, parallel);
    assert!(sequential.iter().any(|m| m.overlap));
    assert!(sequential.iter().any(|m| !m.overlap));
}
