//! Adapters around the external analysis engines.
//!
//! Each adapter discovers its own file list, drives its engine through a
//! [`ToolRunner`], and reshapes the engine's JSON into the records in
//! [`crate::core`]. Adapters hold no state beyond their configuration and
//! are built fresh for every request.

pub mod bandit;
pub mod radon;

use crate::config::ToolsConfig;
use crate::core::{ToolKind, ToolOutput};
use crate::errors::{AnalysisError, Result};
use crate::io::traits::{CommandOutput, ToolRunner};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use bandit::BanditAnalyzer;
pub use radon::RadonAnalyzer;

/// Files handed to one engine invocation. Larger lists are split so the
/// command line stays well under the OS argument limit.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Per-request options forwarded to the engines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Security engine configuration file, passed through unvalidated
    pub config_file: Option<PathBuf>,
    pub debug: bool,
}

pub trait Analyzer: Send + Sync {
    fn tool(&self) -> ToolKind;
    fn analyze(&self, path: &Path, options: &ScanOptions) -> Result<ToolOutput>;
}

pub fn get_analyzer(
    tool: ToolKind,
    runner: Arc<dyn ToolRunner>,
    tools: &ToolsConfig,
) -> Box<dyn Analyzer> {
    match tool {
        ToolKind::Bandit => Box::new(BanditAnalyzer::new(
            runner,
            tools.bandit.clone(),
            tools.extensions.clone(),
        )),
        ToolKind::Radon => Box::new(RadonAnalyzer::new(
            runner,
            tools.radon.clone(),
            tools.extensions.clone(),
        )),
    }
}

fn batches(files: &[PathBuf], batch_size: usize) -> std::slice::Chunks<'_, PathBuf> {
    files.chunks(batch_size.max(1))
}

fn path_args(files: &[PathBuf]) -> impl Iterator<Item = OsString> + '_ {
    files.iter().map(|file| file.as_os_str().to_os_string())
}

fn require_exit(tool: &str, output: &CommandOutput, accepted: &[i32]) -> Result<()> {
    if output.exited_with(accepted) {
        Ok(())
    } else {
        Err(AnalysisError::ToolFailed {
            tool: tool.to_string(),
            status: output.status_label(),
            stderr: output.stderr.trim().to_string(),
        })
    }
}

fn parse_report<T: DeserializeOwned>(tool: &str, stdout: &str) -> Result<T> {
    serde_json::from_str(stdout)
        .map_err(|e| AnalysisError::invalid_output(tool, format!("malformed JSON report: {e}")))
}
