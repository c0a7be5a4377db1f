//! Report rendering.
//!
//! Turns the annotated metric table and its [`Summary`] into the files written to the output
//! directory:
//!
//! | File | Content |
//! |------|---------|
//! | `output.tsv` | One row per read |
//! | `output.html` | The per-read table as a plain HTML page |
//! | `summary.html` | Headline numbers and the three distributions |
//! | `summary.tsv` | Headline numbers as a single row |
//! | `*_histogram.tsv` | One file per distribution |

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::{Distribution, Summary};
use crate::logging::{format_count, format_percent};
use crate::metrics::{
    HistogramBinMetric, ReadTableRow, RunSummaryMetric, format_float, write_metrics_auto,
};
use crate::read_metric::ReadMetric;

/// Per-read table.
pub const READ_TABLE_TSV: &str = "output.tsv";
/// Per-read HTML page.
pub const READ_TABLE_HTML: &str = "output.html";
/// Summary dashboard.
pub const SUMMARY_HTML: &str = "summary.html";
/// Summary row.
pub const SUMMARY_TSV: &str = "summary.tsv";
/// Fragment length histogram.
pub const FRAGMENT_LENGTH_HISTOGRAM: &str = "fragment_length_histogram.tsv";
/// GC content histogram.
pub const GC_CONTENT_HISTOGRAM: &str = "gc_content_histogram.tsv";
/// Mismatch count histogram.
pub const MISMATCH_HISTOGRAM: &str = "mismatch_histogram.tsv";

const READ_TABLE_HEADER: [&str; 5] =
    ["ReadID", "FragmentLength", "AvgBaseQuality", "GCContent", "NumMismatches"];

/// Escapes the characters that are significant in HTML text and attribute values.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes the per-read table as TSV. An empty table produces an empty file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_tsv<P: AsRef<Path>>(path: P, metrics: &[ReadMetric]) -> Result<()> {
    let rows: Vec<ReadTableRow> = metrics.iter().map(ReadTableRow::from).collect();
    write_metrics_auto(path, &rows)
}

/// Renders the per-read HTML page.
#[must_use]
pub fn render_html(metrics: &[ReadMetric]) -> String {
    let overlapping = metrics.iter().filter(|m| m.overlap).count();

    let mut html = String::from("<html><head><title>Read Stats</title></head><body>\n");
    html.push_str("    <h1>Read Statistics</h1>\n");
    writeln!(html, "    <p>Total Mapped Reads: {}</p>", metrics.len()).unwrap();
    writeln!(html, "    <p>Overlapping Reads: {overlapping}</p>").unwrap();
    html.push_str("    <table border='1'>\n    <tr>\n");
    for column in READ_TABLE_HEADER {
        writeln!(html, "        <th>{column}</th>").unwrap();
    }
    html.push_str("    </tr>\n    ");

    for metric in metrics {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(&metric.read_id),
            metric.fragment_length,
            format_float(metric.avg_base_quality),
            format_float(metric.gc_content),
            metric.num_mismatches.map(|n| n.to_string()).unwrap_or_default(),
        ).unwrap();
    }

    html.push_str("</table></body></html>");
    html
}

/// Writes the per-read HTML page.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_html<P: AsRef<Path>>(path: P, metrics: &[ReadMetric]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_html(metrics))
        .with_context(|| format!("Failed to write HTML report: {}", path.display()))
}

/// Renders the summary dashboard.
#[must_use]
pub fn render_summary_html(summary: &Summary) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n<title>Read Stats Summary</title>\n",
    );
    html.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         .cards { display: flex; gap: 1em; flex-wrap: wrap; }\n\
         .card { border: 1px solid #ccc; border-radius: 4px; padding: 0.75em 1.25em; }\n\
         .card .value { font-size: 1.5em; font-weight: bold; }\n\
         table { border-collapse: collapse; margin-bottom: 2em; }\n\
         th, td { border: 1px solid #ccc; padding: 0.25em 0.75em; text-align: right; }\n\
         th:first-child, td:first-child { text-align: left; }\n\
         .bar { background: #4a7ab5; height: 0.8em; }\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str("<h1>Read Statistics Summary</h1>\n<div class='cards'>\n");

    let cards = [
        ("Total Mapped Reads", format_count(summary.total_reads)),
        ("Overlapping Reads", format_count(summary.overlapping_reads)),
        ("Overlap Rate", format_percent(summary.overlap_fraction(), 2)),
        ("Mean Base Quality", format_float(summary.mean_avg_base_quality)),
        ("Reads Without NM Tag", format_count(summary.reads_without_mismatch_tag)),
    ];
    for (title, value) in cards {
        writeln!(
            html,
            "<div class='card'><div>{title}</div><div class='value'>{value}</div></div>"
        ).unwrap();
    }
    html.push_str("</div>\n");

    push_distribution(&mut html, "Fragment Length", &summary.fragment_length);
    push_distribution(&mut html, "GC Content", &summary.gc_content);
    push_distribution(&mut html, "Mismatches", &summary.mismatches);

    html.push_str("</body>\n</html>\n");
    html
}

fn push_distribution(html: &mut String, title: &str, distribution: &Distribution) {
    writeln!(html, "<h2>{title}</h2>").unwrap();
    html.push_str("<table>\n<tr><th>Bin</th><th>Count</th><th>Percent</th><th></th></tr>\n");
    for bin in &distribution.bins {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.2}%</td>\
             <td><div class='bar' style='width: {:.0}px'></div></td></tr>",
            html_escape(&bin.label),
            format_count(bin.count),
            bin.percent,
            bin.percent * 2.0,
        ).unwrap();
    }
    html.push_str("</table>\n");
}

/// Writes the summary dashboard.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_summary_html<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_summary_html(summary))
        .with_context(|| format!("Failed to write summary report: {}", path.display()))
}

/// Writes the summary row and the three histogram files into `dir`.
///
/// # Errors
/// Returns an error if any file cannot be written.
pub fn write_summary_tables(dir: &Path, summary: &Summary) -> Result<()> {
    write_metrics_auto(dir.join(SUMMARY_TSV), &[RunSummaryMetric::from(summary)])?;
    for (file, distribution) in [
        (FRAGMENT_LENGTH_HISTOGRAM, &summary.fragment_length),
        (GC_CONTENT_HISTOGRAM, &summary.gc_content),
        (MISMATCH_HISTOGRAM, &summary.mismatches),
    ] {
        write_metrics_auto(dir.join(file), &HistogramBinMetric::from_distribution(distribution))?;
    }
    Ok(())
}

/// Writes every report into `dir`, which must already exist. Returns the paths written.
///
/// # Errors
/// Returns an error if any file cannot be written.
pub fn write_reports(dir: &Path, metrics: &[ReadMetric], summary: &Summary) -> Result<Vec<PathBuf>> {
    write_tsv(dir.join(READ_TABLE_TSV), metrics)?;
    write_html(dir.join(READ_TABLE_HTML), metrics)?;
    write_summary_html(dir.join(SUMMARY_HTML), summary)?;
    write_summary_tables(dir, summary)?;

    Ok([
        READ_TABLE_TSV,
        READ_TABLE_HTML,
        SUMMARY_HTML,
        SUMMARY_TSV,
        FRAGMENT_LENGTH_HISTOGRAM,
        GC_CONTENT_HISTOGRAM,
        MISMATCH_HISTOGRAM,
    ]
    .iter()
    .map(|file| dir.join(file))
    .collect())
}
