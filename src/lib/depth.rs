//! Depth track normalization.
//!
//! Assembly depth tracks arrive with a 1-based position in the fourth column
//! and the depth value in the fifth. Downstream intersections need proper
//! half-open intervals, so each row is rewritten as
//! `contig, position - 1, position, depth`. Short rows and non-numeric
//! positions are malformed records, routed through the configured
//! [`ErrorPolicy`].

use crate::bed::Interval;
use crate::errors::{ErrorPolicy, Result, StliftError};
use crate::logging::LineProgress;
use anyhow::Context;
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;

/// Per-file normalization statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthStats {
    /// Rows rewritten
    pub rows: u64,
    /// Rows skipped under [`ErrorPolicy::SkipAndReport`]
    pub skipped: u64,
}

/// Rewrites one depth row as a single-base interval carrying the depth value.
///
/// # Errors
/// Returns [`StliftError::MalformedRecord`] if the row has fewer than 5
/// fields or its position column is not a positive integer.
pub fn normalize_line(line: &str, line_number: u64) -> Result<Interval> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(malformed(
            line_number,
            format!("expected at least 5 fields, found {}", fields.len()),
        ));
    }
    let position: u64 = fields[3].parse().map_err(|_| {
        malformed(line_number, format!("position column is not an integer: '{}'", fields[3]))
    })?;
    if position == 0 {
        return Err(malformed(line_number, "position column must be >= 1, got 0".to_string()));
    }
    Ok(Interval::with_trailing(
        fields[0],
        position - 1,
        position,
        vec![fields[4].to_string()],
    ))
}

/// Normalizes a whole depth track into a 4-column BED file.
///
/// # Errors
/// Returns an error on IO failure, or on the first bad record under
/// [`ErrorPolicy::FailFast`].
pub fn normalize_file(
    input: &Path,
    output: &Path,
    on_error: ErrorPolicy,
) -> anyhow::Result<DepthStats> {
    let io = Io::default();
    let reader = io
        .new_reader(input)
        .with_context(|| format!("Failed to open depth track: {}", input.display()))?;
    let mut writer = io
        .new_writer(output)
        .with_context(|| format!("Failed to create normalized depth: {}", output.display()))?;

    let mut stats = DepthStats::default();
    let mut progress = LineProgress::new("Normalized depth rows");

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        let line_number = idx as u64 + 1;

        match normalize_line(line.trim_end(), line_number) {
            Ok(interval) => {
                writeln!(writer, "{interval}")?;
                stats.rows += 1;
            }
            Err(error) => on_error.handle(error, line_number, &mut stats.skipped)?,
        }
        progress.log_if_needed(1);
    }

    progress.log_final();
    writer.flush()?;
    debug!("Normalized {} depth rows ({} skipped)", stats.rows, stats.skipped);
    Ok(stats)
}

fn malformed(line: u64, reason: String) -> StliftError {
    StliftError::MalformedRecord { kind: "depth".to_string(), line, reason }
}
