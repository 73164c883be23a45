//! Joining position files against a normalized depth track.
//!
//! One primitive backs two consumers. Per-site mode left-joins every position
//! row against the depth track and writes each row with its depth appended,
//! `.` standing in where no depth interval overlaps. Count mode only wants to
//! know how many rows the depth track covers. Both run through the same
//! engine so the per-site match count and the count-mode row count can never
//! drift apart: a caller that needs both reads them off a single per-site
//! join.
//!
//! The depth side must be the 4-column output of depth normalization
//! (`contig, start, end, depth`); the position side may carry any number of
//! columns, all of which are preserved ahead of the appended depth value.

use crate::engines::{route_stderr, IntervalEngine, StderrPolicy};
use crate::errors::StliftError;
use anyhow::Context;
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Columns in a normalized depth row.
const DEPTH_COLUMNS: usize = 4;

/// Marker written in the depth column of an uncovered position.
const NO_DEPTH: &str = ".";

/// How the join output is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    /// Every position row, with its depth (or `.`) appended
    PerSite,
    /// Only the position rows the depth track covers, verbatim
    Count,
}

/// What a join produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Rows in the output file
    pub rows: u64,
    /// Rows with an overlapping depth interval
    pub matched: u64,
    /// The file written
    pub output: PathBuf,
}

/// Joins a position file against a normalized depth track.
///
/// In [`JoinMode::PerSite`] the engine's raw left outer join lands in a
/// sibling scratch file, which is projected down to the original position
/// columns plus the depth value and then removed. In [`JoinMode::Count`]
/// the engine writes covered rows straight to the output and `matched`
/// equals `rows`.
///
/// # Errors
/// Returns an error when the engine invocation fails, its diagnostics are
/// rejected by the stderr policy, or a joined row is too short to carry a
/// depth annotation.
pub fn depth_join<E: IntervalEngine>(
    engine: &E,
    positions: &Path,
    depth: &Path,
    mode: JoinMode,
    output: &Path,
    on_stderr: StderrPolicy,
) -> anyhow::Result<JoinOutcome> {
    match mode {
        JoinMode::PerSite => per_site(engine, positions, depth, output, on_stderr),
        JoinMode::Count => count(engine, positions, depth, output, on_stderr),
    }
}

fn per_site<E: IntervalEngine>(
    engine: &E,
    positions: &Path,
    depth: &Path,
    output: &Path,
    on_stderr: StderrPolicy,
) -> anyhow::Result<JoinOutcome> {
    let raw = scratch_path(output);
    let run = engine.intersect_left_outer_join(positions, depth, &raw)?;
    route_stderr(on_stderr, engine.name(), "left outer join", &run)?;

    let io = Io::default();
    let reader = io
        .new_reader(&raw)
        .with_context(|| format!("Failed to open joined rows: {}", raw.display()))?;
    let mut writer = io
        .new_writer(output)
        .with_context(|| format!("Failed to create annotated output: {}", output.display()))?;

    let mut rows = 0u64;
    let mut matched = 0u64;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", raw.display()))?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split('\t').collect();
        if fields.len() <= DEPTH_COLUMNS {
            return Err(StliftError::MalformedRecord {
                kind: "join".to_string(),
                line: idx as u64 + 1,
                reason: format!(
                    "expected more than {DEPTH_COLUMNS} fields, found {}",
                    fields.len()
                ),
            }
            .into());
        }
        let depth_value = fields[fields.len() - 1];
        let kept = &fields[..fields.len() - DEPTH_COLUMNS];
        writeln!(writer, "{}\t{}", kept.join("\t"), depth_value)?;
        rows += 1;
        if depth_value != NO_DEPTH {
            matched += 1;
        }
    }
    writer.flush()?;

    if let Err(e) = std::fs::remove_file(&raw) {
        debug!("Leaving scratch file {}: {e}", raw.display());
    }
    debug!("Annotated {rows} positions, {matched} with depth");
    Ok(JoinOutcome { rows, matched, output: output.to_path_buf() })
}

fn count<E: IntervalEngine>(
    engine: &E,
    positions: &Path,
    depth: &Path,
    output: &Path,
    on_stderr: StderrPolicy,
) -> anyhow::Result<JoinOutcome> {
    let run = engine.intersect_write_a(positions, depth, output)?;
    route_stderr(on_stderr, engine.name(), "intersect", &run)?;

    let io = Io::default();
    let reader = io
        .new_reader(output)
        .with_context(|| format!("Failed to open covered rows: {}", output.display()))?;
    let mut rows = 0u64;
    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read {}", output.display()))?;
        if !line.trim().is_empty() {
            rows += 1;
        }
    }
    debug!("Counted {rows} covered positions");
    Ok(JoinOutcome { rows, matched: rows, output: output.to_path_buf() })
}

/// Sibling path for the raw engine output, removed after projection.
fn scratch_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".loj");
    PathBuf::from(name)
}
