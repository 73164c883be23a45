//! Sequence length index built from an assembly FASTA.
//!
//! Reverse-strand expansion starts from the far end of the query sequence,
//! so every conversion needs the assembled contig lengths up front. The whole
//! index is built once, before any records are processed, and is read-only
//! afterwards.

use crate::errors::{Result, StliftError};
use anyhow::Context;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Map from sequence identifier to sequence length.
#[derive(Debug, Clone, Default)]
pub struct ContigLengths {
    lengths: HashMap<String, u64>,
}

impl ContigLengths {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index by reading every record of a FASTA file.
    ///
    /// The identifier is the first whitespace-delimited token of the record
    /// definition line. Re-registering an identifier with the same length is
    /// accepted; a conflicting length fails the build.
    ///
    /// # Errors
    /// Returns an error if the file is missing or unreadable, a record name
    /// is not valid UTF-8, or an identifier recurs with a different length.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use noodles::fasta;

        let path = path.as_ref();
        if !path.exists() {
            return Err(StliftError::InvalidFileFormat {
                file_type: "FASTA".to_string(),
                path: path.display().to_string(),
                reason: "File does not exist".to_string(),
            }
            .into());
        }

        debug!("Indexing contig lengths from {}", path.display());

        let mut index = Self::new();
        let mut reader = fasta::io::reader::Builder.build_from_path(path)?;
        for result in reader.records() {
            let record =
                result.with_context(|| format!("Failed to read FASTA: {}", path.display()))?;
            let name = std::str::from_utf8(record.name())?;
            index.insert(name, record.sequence().len() as u64)?;
        }

        debug!("Indexed {} contigs", index.len());
        Ok(index)
    }

    /// Registers a sequence length.
    ///
    /// # Errors
    /// Returns [`StliftError::DuplicateContig`] if `id` is already registered
    /// with a different length.
    pub fn insert(&mut self, id: &str, length: u64) -> Result<()> {
        match self.lengths.get(id) {
            Some(&existing) if existing != length => Err(StliftError::DuplicateContig {
                id: id.to_string(),
                existing,
                conflicting: length,
            }),
            Some(_) => Ok(()),
            None => {
                self.lengths.insert(id.to_string(), length);
                Ok(())
            }
        }
    }

    /// Looks up the length of a sequence.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<u64> {
        self.lengths.get(id).copied()
    }

    /// Number of indexed sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether the index holds no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
