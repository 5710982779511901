//! Production implementation of [`ToolRunner`].
//!
//! ```rust,ignore
//! use debtcleaner::io::real::ProcessRunner;
//! use debtcleaner::io::traits::ToolRunner;
//!
//! let runner = ProcessRunner::new();
//! let output = runner.run("radon", &["--version".into()])?;
//! ```

use crate::errors::AnalysisError;
use crate::io::traits::{CommandOutput, ToolRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs engines as child processes with `std::process::Command`.
///
/// Bare program names are resolved through `PATH`; anything containing a
/// path separator is used as given.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn resolve(program: &str) -> Result<PathBuf, AnalysisError> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return Ok(candidate.to_path_buf());
        }
        which::which(program).map_err(|e| AnalysisError::tool_not_found(program, e.to_string()))
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, AnalysisError> {
        let executable = Self::resolve(program)?;
        tracing::debug!(program = %executable.display(), args = ?args, "spawning tool");

        let output = Command::new(&executable)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AnalysisError::ToolSpawn {
                tool: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
