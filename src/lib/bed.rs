//! Tab-delimited record types shared across the conversion stages.
//!
//! Everything here is plain-text BED plumbing: intervals are 0-based and
//! half-open, positions printed in the sixth column of a per-base
//! correspondence row are 1-based. Parsers report [`StliftError::MalformedRecord`]
//! with the 1-based line number of the offending row.

use crate::errors::{Result, StliftError};
use std::fmt;

/// Orientation of an alignment between a target and a query sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    /// Query aligned in its natural orientation (`+`)
    Forward,
    /// Query aligned reverse-complemented (`-`)
    Reverse,
}

impl Strand {
    /// Parses a BED strand symbol. Anything other than `+` or `-` is rejected.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }

    /// Direction in which a query position moves per consumed base.
    #[must_use]
    pub fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// One aligned block from a BED file carrying a CIGAR string in its
/// seventh column.
///
/// Columns are target, start, end, query, mapping quality, strand, CIGAR.
/// The mapping-quality column is carried verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// Target (genomic) sequence name
    pub target: String,
    /// 0-based start of the aligned block on the target
    pub start: u64,
    /// Exclusive end of the aligned block on the target
    pub end: u64,
    /// Query (assembly) sequence name
    pub query: String,
    /// Mapping quality column, uninterpreted
    pub map_quality: String,
    /// Orientation of the query relative to the target
    pub strand: Strand,
    /// CIGAR string describing the alignment
    pub cigar: String,
}

impl AlignmentRecord {
    /// Parses a 7-column alignment row.
    ///
    /// # Errors
    /// Returns [`StliftError::MalformedRecord`] if the row has fewer than
    /// 7 fields, a non-numeric coordinate, or an unrecognized strand symbol.
    pub fn parse(line: &str, line_number: u64) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            return Err(malformed("alignment", line_number, format!(
                "expected at least 7 fields, found {}",
                fields.len()
            )));
        }
        let start = parse_coord(fields[1], "start", "alignment", line_number)?;
        let end = parse_coord(fields[2], "end", "alignment", line_number)?;
        let strand = Strand::from_symbol(fields[5]).ok_or_else(|| {
            malformed("alignment", line_number, format!("unrecognized strand '{}'", fields[5]))
        })?;
        Ok(Self {
            target: fields[0].to_string(),
            start,
            end,
            query: fields[3].to_string(),
            map_quality: fields[4].to_string(),
            strand,
            cigar: fields[6].to_string(),
        })
    }
}

/// A half-open, 0-based interval with any number of carried trailing columns.
///
/// `Display` renders the row back as a tab-joined BED line, so intervals can
/// be streamed through a writer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Sequence name
    pub chrom: String,
    /// 0-based inclusive start
    pub start: u64,
    /// Exclusive end
    pub end: u64,
    /// Columns after the third, carried verbatim
    pub trailing: Vec<String>,
}

impl Interval {
    /// Creates a bare 3-column interval.
    #[must_use]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self { chrom: chrom.into(), start, end, trailing: Vec::new() }
    }

    /// Creates an interval with extra carried columns.
    #[must_use]
    pub fn with_trailing(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        trailing: Vec<String>,
    ) -> Self {
        Self { chrom: chrom.into(), start, end, trailing }
    }

    /// Parses a BED row with at least 3 columns.
    ///
    /// # Errors
    /// Returns [`StliftError::MalformedRecord`] on short rows or non-numeric
    /// coordinates.
    pub fn parse(line: &str, line_number: u64) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(malformed("interval", line_number, format!(
                "expected at least 3 fields, found {}",
                fields.len()
            )));
        }
        let start = parse_coord(fields[1], "start", "interval", line_number)?;
        let end = parse_coord(fields[2], "end", "interval", line_number)?;
        Ok(Self {
            chrom: fields[0].to_string(),
            start,
            end,
            trailing: fields[3..].iter().map(|f| (*f).to_string()).collect(),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)?;
        for field in &self.trailing {
            write!(f, "\t{field}")?;
        }
        Ok(())
    }
}

/// A single base of an alignment, tying one target position to one query
/// position.
///
/// Rendered as the 6-column row `target, start, end, strand, query,
/// queryPosition` where `end = start + 1` and the query position is 1-based.
/// Borrows its names from the [`AlignmentRecord`] it was expanded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCorrespondence<'a> {
    /// Target sequence name
    pub target: &'a str,
    /// 0-based position on the target
    pub target_position: u64,
    /// Orientation inherited from the source alignment
    pub strand: Strand,
    /// Query sequence name
    pub query: &'a str,
    /// 1-based position on the query; walks downward on the reverse strand
    pub query_position: i64,
}

impl fmt::Display for BaseCorrespondence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.target,
            self.target_position,
            self.target_position + 1,
            self.strand,
            self.query,
            self.query_position
        )
    }
}

fn malformed(kind: &str, line: u64, reason: String) -> StliftError {
    StliftError::MalformedRecord { kind: kind.to_string(), line, reason }
}

fn parse_coord(value: &str, field: &str, kind: &str, line: u64) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        malformed(kind, line, format!("{field} column is not a non-negative integer: '{value}'"))
    })
}
