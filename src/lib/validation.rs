//! Input validation utilities
//!
//! This module provides common validation functions for command-line
//! parameters and file paths with consistent error messages.
//!
//! All validation functions use structured error types from [`crate::errors`]
//! to provide rich contextual information when validation fails.

use crate::errors::{Result, StliftError};
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Alignment BED", "Assembly FASTA")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use stlift_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/aligned.bed", "Alignment BED");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(StliftError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that multiple files exist
///
/// # Arguments
/// * `files` - Slice of (path, description) tuples
///
/// # Errors
/// Returns an error for the first file that doesn't exist
///
/// # Example
/// ```no_run
/// use stlift_lib::validation::validate_files_exist;
/// use std::path::PathBuf;
///
/// let files = vec![
///     (PathBuf::from("aligned.bed"), "Alignment BED"),
///     (PathBuf::from("assembly.fa"), "Assembly FASTA"),
/// ];
/// validate_files_exist(&files).unwrap();
/// ```
pub fn validate_files_exist<P: AsRef<Path>>(files: &[(P, &str)]) -> Result<()> {
    for (path, desc) in files {
        validate_file_exists(path, desc)?;
    }
    Ok(())
}

/// Create an output directory if it does not exist yet
///
/// An existing path that is not a directory is rejected rather than written
/// into.
///
/// # Errors
/// Returns an error if the path exists as a non-directory or cannot be
/// created
pub fn ensure_output_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir_ref = dir.as_ref();
    if dir_ref.exists() {
        if dir_ref.is_dir() {
            return Ok(());
        }
        return Err(StliftError::InvalidParameter {
            parameter: "output-dir".to_string(),
            reason: format!("'{}' exists and is not a directory", dir_ref.display()),
        });
    }
    std::fs::create_dir_all(dir_ref).map_err(|e| StliftError::InvalidParameter {
        parameter: "output-dir".to_string(),
        reason: format!("could not create '{}': {e}", dir_ref.display()),
    })
}
