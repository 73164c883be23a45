//! CIGAR parsing and per-base expansion of aligned blocks.
//!
//! Expansion turns one alignment row into a stream of single-base rows, one
//! for each query base the CIGAR consumes. The target cursor advances through
//! every operation, consuming ones and skipping ones alike, so the final
//! target position always equals the block start plus the sum of all
//! operation lengths. The query cursor starts at 1 on the forward strand and
//! at the query length on the reverse strand, and only moves for
//! query-consuming operations.

use crate::bed::{AlignmentRecord, BaseCorrespondence, Strand};
use crate::contig::ContigLengths;
use crate::errors::{ErrorPolicy, Result, StliftError};
use crate::logging::LineProgress;
use anyhow::Context;
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;

/// A CIGAR operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOpKind {
    /// `M`: aligned base, match or mismatch
    Match,
    /// `I`: base present in the query but not the target
    Insertion,
    /// `D`: target base with no query counterpart
    Deletion,
    /// `N`: skipped target region (intron)
    Skip,
    /// `S`: soft-clipped query base
    SoftClip,
    /// `H`: hard-clipped query base, not present in the record
    HardClip,
    /// `P`: silent padding
    Pad,
    /// `=`: aligned base, known match
    SequenceMatch,
    /// `X`: aligned base, known mismatch
    SequenceMismatch,
}

impl CigarOpKind {
    /// Maps a CIGAR operation character to its kind.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            'N' => Some(Self::Skip),
            'S' => Some(Self::SoftClip),
            'H' => Some(Self::HardClip),
            'P' => Some(Self::Pad),
            '=' => Some(Self::SequenceMatch),
            'X' => Some(Self::SequenceMismatch),
            _ => None,
        }
    }

    /// The CIGAR character for this kind.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::Skip => 'N',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Pad => 'P',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
        }
    }

    /// Whether this operation consumes one query base per unit of length.
    ///
    /// Consuming operations step the query cursor; all others leave it
    /// untouched. The target cursor advances for every operation.
    #[must_use]
    pub fn consumes_query(self) -> bool {
        matches!(
            self,
            Self::Match
                | Self::Insertion
                | Self::SoftClip
                | Self::SequenceMatch
                | Self::SequenceMismatch
        )
    }

    /// Whether this operation aligns a query base to a target base.
    #[must_use]
    pub fn is_aligned(self) -> bool {
        matches!(self, Self::Match | Self::SequenceMatch | Self::SequenceMismatch)
    }
}

/// One length-prefixed CIGAR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    /// Run length of the operation
    pub len: u32,
    /// Operation type
    pub kind: CigarOpKind,
}

/// Which query-consuming operations produce an output row.
///
/// Position bookkeeping never depends on this choice: both cursors advance
/// identically under either policy, only the emitted rows differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionPolicy {
    /// Emit a row for every query-consuming base (`M`, `I`, `S`, `=`, `X`)
    #[default]
    QueryConsuming,
    /// Emit rows only for aligned bases (`M`, `=`, `X`)
    AlignedOnly,
}

impl EmissionPolicy {
    /// Whether a base of the given operation produces a row.
    #[must_use]
    pub fn emits(self, kind: CigarOpKind) -> bool {
        match self {
            Self::QueryConsuming => kind.consumes_query(),
            Self::AlignedOnly => kind.is_aligned(),
        }
    }
}

/// Tokenizes a CIGAR string into its operations.
///
/// The accepted grammar is one or more digit runs each followed by one of
/// `MIDNSHP=X`. A trailing digit run with no operation character, an
/// operation with no preceding digits, and any other character are all
/// rejected.
///
/// # Errors
/// Returns [`StliftError::MalformedCigar`] naming the offending character
/// and its byte offset.
pub fn parse_cigar(cigar: &str) -> Result<Vec<CigarOp>> {
    let mut ops = Vec::new();
    let mut len: u64 = 0;
    let mut have_digits = false;

    for (offset, ch) in cigar.char_indices() {
        if let Some(digit) = ch.to_digit(10) {
            len = len * 10 + u64::from(digit);
            if len > u64::from(u32::MAX) {
                return Err(malformed(cigar, format!("operation length overflows at offset {offset}")));
            }
            have_digits = true;
        } else if let Some(kind) = CigarOpKind::from_code(ch) {
            if !have_digits {
                return Err(malformed(
                    cigar,
                    format!("operation '{ch}' at offset {offset} has no length"),
                ));
            }
            ops.push(CigarOp { len: len as u32, kind });
            len = 0;
            have_digits = false;
        } else {
            return Err(malformed(
                cigar,
                format!("unrecognized operation '{ch}' at offset {offset}"),
            ));
        }
    }

    if have_digits {
        return Err(malformed(cigar, "trailing length with no operation".to_string()));
    }
    if ops.is_empty() {
        return Err(malformed(cigar, "no operations".to_string()));
    }
    Ok(ops)
}

/// Total target distance covered by a sequence of operations.
///
/// Every operation advances the target cursor by its full length, so this is
/// simply the sum of all lengths.
#[must_use]
pub fn target_span(ops: &[CigarOp]) -> u64 {
    ops.iter().map(|op| u64::from(op.len)).sum()
}

/// Expands one alignment record into per-base correspondence rows.
///
/// The query length is looked up for both strands even though only the
/// reverse strand seeds its cursor from it, so a query absent from the
/// index fails regardless of orientation.
///
/// # Errors
/// Returns [`StliftError::MalformedCigar`] for an unparseable CIGAR and
/// [`StliftError::ContigNotFound`] for a query with no length entry.
pub fn expand<'a>(
    record: &'a AlignmentRecord,
    lengths: &ContigLengths,
    policy: EmissionPolicy,
) -> Result<Vec<BaseCorrespondence<'a>>> {
    let ops = parse_cigar(&record.cigar)?;
    let query_length = lengths
        .get(&record.query)
        .ok_or_else(|| StliftError::ContigNotFound { id: record.query.clone() })?;

    let mut query_position: i64 = match record.strand {
        Strand::Forward => 1,
        Strand::Reverse => query_length as i64,
    };
    let step = record.strand.step();
    let mut target_position = record.start;
    let mut rows = Vec::new();

    for op in &ops {
        if op.kind.consumes_query() {
            for _ in 0..op.len {
                if policy.emits(op.kind) {
                    rows.push(BaseCorrespondence {
                        target: &record.target,
                        target_position,
                        strand: record.strand,
                        query: &record.query,
                        query_position,
                    });
                }
                query_position += step;
                target_position += 1;
            }
        } else {
            target_position += u64::from(op.len);
        }
    }

    debug_assert_eq!(target_position, record.start + target_span(&ops));
    Ok(rows)
}

/// Per-file expansion statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandStats {
    /// Alignment records expanded
    pub records: u64,
    /// Records skipped under [`ErrorPolicy::SkipAndReport`]
    pub skipped: u64,
    /// Correspondence rows written
    pub emitted: u64,
}

/// Expands every alignment record of a BED file into a per-base BED file.
///
/// # Errors
/// Returns an error on IO failure, or on the first bad record under
/// [`ErrorPolicy::FailFast`].
pub fn expand_file(
    input: &Path,
    lengths: &ContigLengths,
    output: &Path,
    policy: EmissionPolicy,
    on_error: ErrorPolicy,
) -> anyhow::Result<ExpandStats> {
    let io = Io::default();
    let reader = io
        .new_reader(input)
        .with_context(|| format!("Failed to open alignment BED: {}", input.display()))?;
    let mut writer = io
        .new_writer(output)
        .with_context(|| format!("Failed to create output BED: {}", output.display()))?;

    let mut stats = ExpandStats::default();
    let mut progress = LineProgress::new("Expanded alignment records").with_interval(100_000);

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        let line_number = idx as u64 + 1;
        let trimmed = line.trim_end();

        let record = match AlignmentRecord::parse(trimmed, line_number) {
            Ok(record) => record,
            Err(error) => {
                on_error.handle(error, line_number, &mut stats.skipped)?;
                continue;
            }
        };
        let rows = match expand(&record, lengths, policy) {
            Ok(rows) => rows,
            Err(error) => {
                on_error.handle(error, line_number, &mut stats.skipped).with_context(|| {
                    format!("Failed on record at line {line_number} of {}", input.display())
                })?;
                continue;
            }
        };

        for row in &rows {
            writeln!(writer, "{row}")?;
        }
        stats.records += 1;
        stats.emitted += rows.len() as u64;
        progress.log_if_needed(1);
    }

    progress.log_final();
    writer.flush()?;
    debug!(
        "Expanded {} records into {} rows ({} skipped)",
        stats.records, stats.emitted, stats.skipped
    );
    Ok(stats)
}

fn malformed(cigar: &str, reason: String) -> StliftError {
    StliftError::MalformedCigar { cigar: cigar.to_string(), reason }
}
