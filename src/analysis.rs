//! Request handling shared by the HTTP service and the CLI.
//!
//! [`AnalysisService`] validates the requested path, runs the selected
//! adapters one after the other and hands their outputs to the normalizer.
//! It performs blocking process I/O; async callers should run it on a
//! blocking worker.

use crate::analyzers::{get_analyzer, ScanOptions};
use crate::config::Settings;
use crate::core::ToolKind;
use crate::errors::{AnalysisError, Result};
use crate::io::traits::ToolRunner;
use crate::output::{format_analysis_response, NormalizedResponse, RawResults};
use crate::versions::{get_tool_versions, ToolVersions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Body of `POST /analyze/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// File or directory to analyze, on the server's filesystem
    pub code_path: PathBuf,
    /// Security engine configuration file
    #[serde(default)]
    pub config_file: Option<PathBuf>,
    /// Falls back to the service's `debug` setting when absent
    #[serde(default)]
    pub debug: Option<bool>,
    /// Tool names to run; absent or empty means every known tool
    #[serde(default)]
    pub analysis_types: Option<Vec<String>>,
}

impl AnalysisRequest {
    pub fn new(code_path: impl Into<PathBuf>) -> Self {
        Self {
            code_path: code_path.into(),
            config_file: None,
            debug: None,
            analysis_types: None,
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.analysis_types = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    /// Known tools the caller asked for, in request order, without duplicates.
    /// Unknown names are dropped.
    pub fn selected_tools(&self) -> Vec<ToolKind> {
        let requested = match self.analysis_types.as_deref() {
            None | Some([]) => return ToolKind::ALL.to_vec(),
            Some(names) => names,
        };

        let mut selected = Vec::new();
        for name in requested {
            match ToolKind::from_name(name) {
                Some(tool) if !selected.contains(&tool) => selected.push(tool),
                Some(_) => {}
                None => tracing::debug!(tool = %name, "ignoring unknown analysis type"),
            }
        }
        selected
    }
}

/// Runs analyses with one configuration and one tool runner.
#[derive(Clone)]
pub struct AnalysisService {
    settings: Arc<Settings>,
    runner: Arc<dyn ToolRunner>,
}

impl AnalysisService {
    pub fn new(settings: Settings, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            settings: Arc::new(settings),
            runner,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate the request, run the selected tools in sequence and
    /// normalize their results.
    ///
    /// A missing `code_path` fails before any tool runs. Any tool failure
    /// fails the whole request.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<NormalizedResponse> {
        let path = &request.code_path;
        let _span = tracing::info_span!("analyze", path = %path.display()).entered();

        if !path.exists() {
            return Err(AnalysisError::path_not_found(path));
        }

        let options = ScanOptions {
            config_file: request.config_file.clone(),
            debug: request.debug.unwrap_or(self.settings.debug),
        };

        let mut raw = RawResults::new();
        for tool in request.selected_tools() {
            let analyzer = get_analyzer(tool, Arc::clone(&self.runner), &self.settings.tools);
            let output = analyzer.analyze(path, &options)?;
            tracing::debug!(%tool, "tool finished");
            raw.insert(analyzer.tool().name().to_string(), output);
        }

        Ok(format_analysis_response(raw, self.versions()))
    }

    pub fn versions(&self) -> ToolVersions {
        get_tool_versions(self.runner.as_ref(), &self.settings.tools)
    }
}
