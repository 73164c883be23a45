//! Custom error types for stlift operations.

use thiserror::Error;

/// Result type alias for stlift operations
pub type Result<T> = std::result::Result<T, StliftError>;

/// Error type for stlift operations
#[derive(Error, Debug)]
pub enum StliftError {
    /// CIGAR string that does not match the expected grammar
    #[error("Malformed CIGAR '{cigar}': {reason}")]
    MalformedCigar {
        /// The offending CIGAR string
        cigar: String,
        /// Explanation, including the offending character and its offset
        reason: String,
    },

    /// Tab-delimited record that cannot be parsed
    #[error("Malformed {kind} record at line {line}: {reason}")]
    MalformedRecord {
        /// The kind of record (e.g. "alignment", "depth", "variant")
        kind: String,
        /// 1-based line number in the input file
        line: u64,
        /// Explanation of the problem
        reason: String,
    },

    /// The same sequence identifier registered with two different lengths
    #[error("Duplicate contig '{id}': lengths {existing} and {conflicting} conflict")]
    DuplicateContig {
        /// The sequence identifier
        id: String,
        /// Length already registered
        existing: u64,
        /// Length of the conflicting registration
        conflicting: u64,
    },

    /// A sequence identifier with no entry in the length index
    #[error("Contig '{id}' not found in the length index")]
    ContigNotFound {
        /// The missing sequence identifier
        id: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "FASTA", "BED")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A required external tool is missing or unusable
    #[error("Required tool '{tool}' is not usable: {reason}")]
    Configuration {
        /// The tool name (e.g., "bedtools")
        tool: String,
        /// Explanation of the failure
        reason: String,
    },

    /// An external tool invocation failed
    #[error("{tool} {operation} failed: {message}")]
    Collaborator {
        /// The tool name (e.g., "bedtools")
        tool: String,
        /// The operation being performed (e.g., "intersect")
        operation: String,
        /// Failure details, including captured diagnostics
        message: String,
    },
}

/// How batch drivers respond to a record-level error.
///
/// Stage drivers process one row at a time; a row that fails to parse or
/// convert is routed through this policy. IO failures are never routed here,
/// they always abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first bad record
    #[default]
    FailFast,
    /// Log the bad record at WARN level, count it, and continue
    SkipAndReport,
}

impl ErrorPolicy {
    /// Routes a record-level error according to the policy.
    ///
    /// Under [`ErrorPolicy::SkipAndReport`] the error is logged with its
    /// 1-based line number and `skipped` is incremented.
    ///
    /// # Errors
    /// Under [`ErrorPolicy::FailFast`] the error is returned unchanged.
    pub fn handle(self, error: StliftError, line_number: u64, skipped: &mut u64) -> Result<()> {
        match self {
            Self::FailFast => Err(error),
            Self::SkipAndReport => {
                log::warn!("Skipping record at line {line_number}: {error}");
                *skipped += 1;
                Ok(())
            }
        }
    }
}
