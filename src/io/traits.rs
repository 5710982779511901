//! The seam through which external analysis engines are executed.
//!
//! Adapters never spawn processes directly; they go through a
//! [`ToolRunner`]. Production code uses [`crate::io::real::ProcessRunner`],
//! tests substitute a scripted runner that returns canned engine output.

use crate::errors::AnalysisError;
use std::ffi::OsString;

/// Captured result of one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn exited_with(&self, codes: &[i32]) -> bool {
        self.status.is_some_and(|code| codes.contains(&code))
    }

    /// Human-readable exit status for error messages
    pub fn status_label(&self) -> String {
        self.status
            .map(|code| code.to_string())
            .unwrap_or_else(|| "signal".to_string())
    }
}

/// Executes an external program to completion.
///
/// Implementations must be thread-safe (`Send + Sync`); a single runner is
/// shared by every request the service handles.
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ToolNotFound` or `AnalysisError::ToolSpawn`
    /// when the process cannot be started. A non-zero exit is NOT an error
    /// at this level; callers decide which exit codes they accept.
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, AnalysisError>;
}
