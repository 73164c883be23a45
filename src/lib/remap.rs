//! Rewriting per-base rows into assembly coordinates.
//!
//! A correspondence row records a target position in columns 1-3 and the
//! matching query name and 1-based query position in columns 5-6. Remapping
//! swaps the frame: the query becomes the interval and the query position
//! becomes a half-open single base. In [`RemapMode::Extended`] the genomic
//! side (target, start, end, strand) is carried along as trailing columns so
//! later joins can recover where each assembly base came from.

use crate::bed::Interval;
use crate::errors::{ErrorPolicy, Result, StliftError};
use crate::logging::LineProgress;
use anyhow::Context;
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;

/// Output shape for remapped rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemapMode {
    /// 3 columns: query, position - 1, position
    Minimal,
    /// 7 columns: the minimal 3 plus target, start, end, strand
    #[default]
    Extended,
}

/// Per-file remap statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapStats {
    /// Rows rewritten
    pub rows: u64,
    /// Rows skipped under [`ErrorPolicy::SkipAndReport`]
    pub skipped: u64,
}

/// Rewrites one correspondence row into assembly coordinates.
///
/// The input must carry the 6 correspondence columns; anything after them
/// (for example the exon columns appended by an intersection) is ignored.
///
/// # Errors
/// Returns [`StliftError::MalformedRecord`] on short rows or a query
/// position that is not a positive integer.
pub fn remap_line(line: &str, line_number: u64, mode: RemapMode) -> Result<Interval> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 6 {
        return Err(malformed(
            line_number,
            format!("expected at least 6 fields, found {}", fields.len()),
        ));
    }
    let query_position: u64 = fields[5].parse().map_err(|_| {
        malformed(line_number, format!("query position is not an integer: '{}'", fields[5]))
    })?;
    if query_position == 0 {
        return Err(malformed(line_number, "query position must be >= 1, got 0".to_string()));
    }

    let trailing = match mode {
        RemapMode::Minimal => Vec::new(),
        RemapMode::Extended => {
            fields[..4].iter().map(|f| (*f).to_string()).collect()
        }
    };
    Ok(Interval::with_trailing(fields[4], query_position - 1, query_position, trailing))
}

/// Remaps a whole file of correspondence rows.
///
/// # Errors
/// Returns an error on IO failure, or on the first bad record under
/// [`ErrorPolicy::FailFast`].
pub fn remap_file(
    input: &Path,
    output: &Path,
    mode: RemapMode,
    on_error: ErrorPolicy,
) -> anyhow::Result<RemapStats> {
    let io = Io::default();
    let reader = io
        .new_reader(input)
        .with_context(|| format!("Failed to open correspondence BED: {}", input.display()))?;
    let mut writer = io
        .new_writer(output)
        .with_context(|| format!("Failed to create remapped BED: {}", output.display()))?;

    let mut stats = RemapStats::default();
    let mut progress = LineProgress::new("Remapped positions");

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        let line_number = idx as u64 + 1;

        match remap_line(line.trim_end(), line_number, mode) {
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
    debug!("Remapped {} rows ({} skipped)", stats.rows, stats.skipped);
    Ok(stats)
}

fn malformed(line: u64, reason: String) -> StliftError {
    StliftError::MalformedRecord { kind: "correspondence".to_string(), line, reason }
}
