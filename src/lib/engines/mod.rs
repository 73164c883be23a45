//! External collaborator tools behind narrow traits.
//!
//! Interval-set algebra (sort, merge, intersect) and VCF restriction are
//! delegated to external tools rather than reimplemented. The traits here pin
//! down exactly which operations the conversion stages need, so orchestration
//! code can run against in-process fakes in tests while production runs drive
//! the real executables. Every invocation is spawned with an argument vector,
//! never through a shell, and must exit with status zero to count as a
//! success.

use crate::errors::{Result, StliftError};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub mod bedtools;
pub mod vcftools;

pub use bedtools::BedtoolsEngine;
pub use vcftools::VcftoolsEngine;

/// Outcome of one zero-status collaborator invocation.
///
/// Exists only for successful runs; a spawn failure, non-zero exit, or
/// timeout is a [`StliftError::Collaborator`] instead. Captured diagnostics
/// are handed back for routing rather than printed or dropped here.
#[derive(Debug, Clone, Default)]
pub struct EngineRun {
    /// Everything the tool wrote to its stderr stream
    pub stderr: String,
}

impl EngineRun {
    /// Whether the tool wrote anything beyond whitespace to stderr.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// How diagnostics from a successful collaborator run are treated.
///
/// External tools report truncated inputs and partial failures on stderr
/// while still exiting zero, so a silent stderr stream is part of the
/// success criterion by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrPolicy {
    /// Treat any stderr output as a failure of the invocation
    #[default]
    Abort,
    /// Log the diagnostics at WARN level and continue
    Warn,
}

/// Routes a successful run's diagnostics according to the policy.
///
/// A run with an empty stderr stream always passes. Non-zero exits never
/// reach this point; they fail inside the invocation itself.
///
/// # Errors
/// Returns [`StliftError::Collaborator`] under [`StderrPolicy::Abort`] when
/// the run carried diagnostics.
pub fn route_stderr(
    policy: StderrPolicy,
    tool: &str,
    operation: &str,
    run: &EngineRun,
) -> Result<()> {
    if !run.has_diagnostics() {
        return Ok(());
    }
    match policy {
        StderrPolicy::Abort => Err(StliftError::Collaborator {
            tool: tool.to_string(),
            operation: operation.to_string(),
            message: format!("wrote diagnostics to stderr:\n{}", run.stderr.trim_end()),
        }),
        StderrPolicy::Warn => {
            for line in run.stderr.lines() {
                warn!("{tool} {operation}: {line}");
            }
            Ok(())
        }
    }
}

/// Interval-set operations the conversion stages delegate.
///
/// All paths refer to plain-text BED files. Operations that produce a file
/// receive its destination explicitly; nothing is written to the current
/// directory or derived implicitly.
pub trait IntervalEngine {
    /// Short tool name used in logs and error messages.
    fn name(&self) -> &str;

    /// Verifies the backing tool responds, before any work is attempted.
    ///
    /// # Errors
    /// Returns [`StliftError::Configuration`] when the tool is missing or
    /// cannot report its version.
    fn probe(&self) -> Result<()>;

    /// Sorts an interval file by sequence name and start coordinate.
    ///
    /// # Errors
    /// Returns [`StliftError::Collaborator`] when the invocation fails.
    fn sort(&self, input: &Path, output: &Path) -> Result<EngineRun>;

    /// Merges overlapping intervals of a sorted file.
    ///
    /// # Errors
    /// Returns [`StliftError::Collaborator`] when the invocation fails.
    fn merge(&self, input: &Path, output: &Path) -> Result<EngineRun>;

    /// Writes each row of `a` once per row of `b` it overlaps, keeping the
    /// original `a` columns.
    ///
    /// # Errors
    /// Returns [`StliftError::Collaborator`] when the invocation fails.
    fn intersect_write_a(&self, a: &Path, b: &Path, output: &Path) -> Result<EngineRun>;

    /// Writes every row of `a` with the columns of each overlapping `b` row
    /// appended, or null markers when nothing overlaps.
    ///
    /// # Errors
    /// Returns [`StliftError::Collaborator`] when the invocation fails.
    fn intersect_left_outer_join(&self, a: &Path, b: &Path, output: &Path) -> Result<EngineRun>;
}

/// Variant-call restriction the conversion stages delegate.
pub trait VariantEngine {
    /// Short tool name used in logs and error messages.
    fn name(&self) -> &str;

    /// Verifies the backing tool responds, before any work is attempted.
    ///
    /// # Errors
    /// Returns [`StliftError::Configuration`] when the tool is missing or
    /// cannot report its version.
    fn probe(&self) -> Result<()>;

    /// Restricts a VCF to the calls falling inside the given intervals,
    /// writing the restricted VCF under `out_prefix`. Returns the path of
    /// the file actually written, since the tool appends its own suffix.
    ///
    /// # Errors
    /// Returns [`StliftError::Collaborator`] when the invocation fails.
    fn restrict_by_intervals(
        &self,
        vcf: &Path,
        bed: &Path,
        out_prefix: &Path,
    ) -> Result<(PathBuf, EngineRun)>;
}

/// Checks that an executable answers `--version` with a zero exit.
///
/// # Errors
/// Returns [`StliftError::Configuration`] naming the tool when the process
/// cannot be spawned or exits non-zero.
pub(crate) fn probe_tool(tool: &str, executable: &Path) -> Result<()> {
    let output = Command::new(executable)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| StliftError::Configuration {
            tool: tool.to_string(),
            reason: format!("could not run '{} --version': {e}", executable.display()),
        })?;
    if !output.status.success() {
        return Err(StliftError::Configuration {
            tool: tool.to_string(),
            reason: format!("'{} --version' exited with {}", executable.display(), output.status),
        });
    }
    let version = String::from_utf8_lossy(&output.stdout);
    debug!("{tool} available: {}", version.lines().next().unwrap_or("").trim());
    Ok(())
}

/// Runs one collaborator process to completion.
///
/// With `stdout_to` set, the child's stdout is redirected into that file,
/// standing in for shell output redirection. Without it, stdout is drained
/// and logged at DEBUG. Stderr is always drained concurrently so a chatty
/// tool cannot deadlock on a full pipe. A timeout, when set, kills the child
/// on expiry.
///
/// # Errors
/// Returns [`StliftError::Collaborator`] on spawn failure, non-zero exit,
/// or timeout.
pub(crate) fn run_tool(
    tool: &str,
    operation: &str,
    command: &mut Command,
    stdout_to: Option<&Path>,
    timeout: Option<Duration>,
) -> Result<EngineRun> {
    match stdout_to {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                collaborator(tool, operation, format!("could not create {}: {e}", path.display()))
            })?;
            command.stdout(Stdio::from(file));
        }
        None => {
            command.stdout(Stdio::piped());
        }
    }
    command.stdin(Stdio::null()).stderr(Stdio::piped());

    debug!("Launching {tool} {operation}: {command:?}");
    let mut child = command
        .spawn()
        .map_err(|e| collaborator(tool, operation, format!("failed to spawn: {e}")))?;

    let stderr_drain = drain(child.stderr.take());
    let stdout_drain = drain(child.stdout.take());

    let status = wait_with_timeout(&mut child, timeout)
        .map_err(|e| collaborator(tool, operation, format!("failed while waiting: {e}")))?;

    let stderr = stderr_drain.join().unwrap_or_default();
    let stdout = stdout_drain.join().unwrap_or_default();
    if !stdout.trim().is_empty() {
        debug!("{tool} {operation} stdout: {}", stdout.trim_end());
    }

    let Some(status) = status else {
        let limit = timeout.unwrap_or_default();
        let mut message = format!("timed out after {}s and was killed", limit.as_secs());
        if !stderr.trim().is_empty() {
            message.push_str(&format!("; partial stderr:\n{}", stderr.trim_end()));
        }
        return Err(collaborator(tool, operation, message));
    };
    if !status.success() {
        let mut message = format!("exited with {status}");
        if !stderr.trim().is_empty() {
            message.push_str(&format!(":\n{}", stderr.trim_end()));
        }
        return Err(collaborator(tool, operation, message));
    }
    Ok(EngineRun { stderr })
}

/// Reads a child stream to EOF on its own thread.
fn drain<R: Read + Send + 'static>(stream: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut text = String::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_string(&mut text);
        }
        text
    })
}

/// Waits for a child, killing it if the deadline passes first.
///
/// Returns `None` when the child was killed on timeout. The kill is always
/// followed by a reaping wait so no zombie is left behind.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(Duration::from_millis(25));
    }
}

fn collaborator(tool: &str, operation: &str, message: String) -> StliftError {
    StliftError::Collaborator {
        tool: tool.to_string(),
        operation: operation.to_string(),
        message,
    }
}
