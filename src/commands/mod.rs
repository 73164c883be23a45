//! CLI command implementations for stlift.
//!
//! This module contains all the command implementations for the stlift CLI tool.
//! Each submodule implements a specific command (expand, remap, pipeline, etc.).
//!
//! # Command Categories
//!
//! ## Conversion stages
//! - [`expand`] - Expand spliced alignments into per-base correspondence rows
//! - [`depth`] - Normalize a per-base depth track into BED intervals
//! - [`remap`] - Reanchor correspondence rows into assembly coordinates
//! - [`vcf`] - Bridge variant calls between VCF and BED representations
//!
//! ## Interval operations
//! - [`prepare`] - Sort and merge an exon BED through the interval engine
//! - [`join`] - Annotate a position BED with depth values
//!
//! ## Orchestration
//! - [`pipeline`] - Run the full conversion pipeline end to end

// Blanket clippy pedantic allows for command implementations.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod depth;
pub mod expand;
pub mod join;
pub mod pipeline;
pub mod prepare;
pub mod remap;
pub mod vcf;
