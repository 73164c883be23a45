//! bedtools-backed interval engine.
//!
//! Maps each [`IntervalEngine`] operation onto one `bedtools` subcommand,
//! with the subcommand's stdout redirected into the destination file. The
//! executable defaults to `bedtools` on the search path but can point at any
//! compatible binary.

use crate::engines::{probe_tool, run_tool, EngineRun, IntervalEngine};
use crate::errors::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// [`IntervalEngine`] implementation that shells out to bedtools.
#[derive(Debug, Clone)]
pub struct BedtoolsEngine {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl BedtoolsEngine {
    /// Creates an engine invoking `bedtools` from the search path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_executable("bedtools")
    }

    /// Creates an engine invoking the given executable.
    #[must_use]
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), timeout: None }
    }

    /// Sets an upper bound on the wall time of each invocation.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self) -> Command {
        Command::new(&self.executable)
    }
}

impl Default for BedtoolsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalEngine for BedtoolsEngine {
    fn name(&self) -> &str {
        "bedtools"
    }

    fn probe(&self) -> Result<()> {
        probe_tool(self.name(), &self.executable)
    }

    fn sort(&self, input: &Path, output: &Path) -> Result<EngineRun> {
        let mut cmd = self.command();
        cmd.arg("sort").arg("-i").arg(input);
        run_tool(self.name(), "sort", &mut cmd, Some(output), self.timeout)
    }

    fn merge(&self, input: &Path, output: &Path) -> Result<EngineRun> {
        let mut cmd = self.command();
        cmd.arg("merge").arg("-i").arg(input);
        run_tool(self.name(), "merge", &mut cmd, Some(output), self.timeout)
    }

    fn intersect_write_a(&self, a: &Path, b: &Path, output: &Path) -> Result<EngineRun> {
        let mut cmd = self.command();
        cmd.arg("intersect").arg("-wa").arg("-a").arg(a).arg("-b").arg(b);
        run_tool(self.name(), "intersect", &mut cmd, Some(output), self.timeout)
    }

    fn intersect_left_outer_join(&self, a: &Path, b: &Path, output: &Path) -> Result<EngineRun> {
        let mut cmd = self.command();
        cmd.arg("intersect").arg("-loj").arg("-a").arg(a).arg("-b").arg(b);
        run_tool(self.name(), "left outer join", &mut cmd, Some(output), self.timeout)
    }
}
