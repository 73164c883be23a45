//! Integration tests for the stlift binary.
//!
//! Stage commands are exercised end to end through the compiled binary.
//! Commands that shell out to bedtools or vcftools run against small fake
//! tools installed into a temp directory, so the suite needs no external
//! software; those tests are Unix-only because the fakes are shell scripts.

mod test_depth_command;
mod test_error_paths;
mod test_expand_command;
mod test_remap_command;

#[cfg(unix)]
mod test_join_command;
#[cfg(unix)]
mod test_pipeline_command;
