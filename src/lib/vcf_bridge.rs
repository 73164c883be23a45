//! Plain-text bridging between VCF call sets and BED intervals.
//!
//! Interval tools cannot restrict a VCF directly, so each data line is
//! reshaped into `chrom, pos - 1, pos` with every remaining VCF column
//! carried as trailing fields, and the header is parked verbatim in a
//! sidecar file. The inverse direction recovers the 1-based position from
//! the interval end, so a round trip reproduces the original data lines
//! exactly. No VCF semantics are interpreted along the way.

use crate::bed::Interval;
use crate::errors::{ErrorPolicy, Result, StliftError};
use crate::logging::LineProgress;
use anyhow::Context;
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;

/// Per-file bridge statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Data lines converted
    pub data_rows: u64,
    /// Header lines carried verbatim
    pub header_rows: u64,
    /// Data lines skipped under [`ErrorPolicy::SkipAndReport`]
    pub skipped: u64,
}

/// Converts one VCF data line into a single-base interval.
///
/// Columns beyond the position are carried verbatim as trailing fields.
///
/// # Errors
/// Returns [`StliftError::MalformedRecord`] if the line has fewer than 2
/// fields or its position is not a positive integer.
pub fn variant_to_interval(line: &str, line_number: u64) -> Result<Interval> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 2 {
        return Err(malformed(
            line_number,
            format!("expected at least 2 fields, found {}", fields.len()),
        ));
    }
    let position: u64 = fields[1].parse().map_err(|_| {
        malformed(line_number, format!("position is not an integer: '{}'", fields[1]))
    })?;
    if position == 0 {
        return Err(malformed(line_number, "position must be >= 1, got 0".to_string()));
    }
    Ok(Interval::with_trailing(
        fields[0],
        position - 1,
        position,
        fields[2..].iter().map(|f| (*f).to_string()).collect(),
    ))
}

/// Converts one bridged interval row back into a VCF data line.
///
/// The position is taken from the interval end; the start column is dropped.
///
/// # Errors
/// Returns [`StliftError::MalformedRecord`] if the row has fewer than 3
/// fields.
pub fn interval_to_variant_line(line: &str, line_number: u64) -> Result<String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(malformed(
            line_number,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    }
    let mut out = String::with_capacity(line.len());
    out.push_str(fields[0]);
    out.push('\t');
    out.push_str(fields[2]);
    for field in &fields[3..] {
        out.push('\t');
        out.push_str(field);
    }
    Ok(out)
}

/// Splits a VCF into a BED of single-base intervals and a verbatim header
/// sidecar.
///
/// # Errors
/// Returns an error on IO failure, or on the first bad data line under
/// [`ErrorPolicy::FailFast`].
pub fn vcf_to_bed(
    vcf: &Path,
    bed: &Path,
    header: &Path,
    on_error: ErrorPolicy,
) -> anyhow::Result<BridgeStats> {
    let io = Io::default();
    let reader =
        io.new_reader(vcf).with_context(|| format!("Failed to open VCF: {}", vcf.display()))?;
    let mut bed_writer = io
        .new_writer(bed)
        .with_context(|| format!("Failed to create interval BED: {}", bed.display()))?;
    let mut header_writer = io
        .new_writer(header)
        .with_context(|| format!("Failed to create header sidecar: {}", header.display()))?;

    let mut stats = BridgeStats::default();
    let mut progress = LineProgress::new("Bridged variant lines").with_interval(100_000);

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", vcf.display()))?;
        let line_number = idx as u64 + 1;
        let trimmed = line.trim_end();

        if trimmed.starts_with('#') {
            writeln!(header_writer, "{trimmed}")?;
            stats.header_rows += 1;
            continue;
        }
        match variant_to_interval(trimmed, line_number) {
            Ok(interval) => {
                writeln!(bed_writer, "{interval}")?;
                stats.data_rows += 1;
            }
            Err(error) => on_error.handle(error, line_number, &mut stats.skipped)?,
        }
        progress.log_if_needed(1);
    }

    progress.log_final();
    bed_writer.flush()?;
    header_writer.flush()?;
    debug!(
        "Bridged {} data lines, {} header lines ({} skipped)",
        stats.data_rows, stats.header_rows, stats.skipped
    );
    Ok(stats)
}

/// Reassembles a VCF from a bridged interval BED and its header sidecar.
///
/// # Errors
/// Returns an error on IO failure, or on the first bad row under
/// [`ErrorPolicy::FailFast`].
pub fn bed_to_vcf(
    bed: &Path,
    header: &Path,
    vcf: &Path,
    on_error: ErrorPolicy,
) -> anyhow::Result<BridgeStats> {
    let io = Io::default();
    let header_reader = io
        .new_reader(header)
        .with_context(|| format!("Failed to open header sidecar: {}", header.display()))?;
    let bed_reader = io
        .new_reader(bed)
        .with_context(|| format!("Failed to open interval BED: {}", bed.display()))?;
    let mut writer =
        io.new_writer(vcf).with_context(|| format!("Failed to create VCF: {}", vcf.display()))?;

    let mut stats = BridgeStats::default();

    for line in header_reader.lines() {
        let line = line.with_context(|| format!("Failed to read {}", header.display()))?;
        writeln!(writer, "{}", line.trim_end())?;
        stats.header_rows += 1;
    }

    for (idx, line) in bed_reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", bed.display()))?;
        let line_number = idx as u64 + 1;

        match interval_to_variant_line(line.trim_end(), line_number) {
            Ok(variant) => {
                writeln!(writer, "{variant}")?;
                stats.data_rows += 1;
            }
            Err(error) => on_error.handle(error, line_number, &mut stats.skipped)?,
        }
    }

    writer.flush()?;
    debug!(
        "Reassembled {} data lines under {} header lines ({} skipped)",
        stats.data_rows, stats.header_rows, stats.skipped
    );
    Ok(stats)
}

fn malformed(line: u64, reason: String) -> StliftError {
    StliftError::MalformedRecord { kind: "variant".to_string(), line, reason }
}
