//! Version lookup for the analysis engines.
//!
//! Lookups never fail: any problem running `<tool> --version` is logged and
//! reported as [`UNKNOWN_VERSION`].

use crate::config::ToolsConfig;
use crate::core::ToolKind;
use crate::io::traits::ToolRunner;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;

pub const UNKNOWN_VERSION: &str = "unknown";

/// Version string per known tool, keyed by tool name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolVersions(BTreeMap<String, String>);

impl ToolVersions {
    pub fn get(&self, tool: ToolKind) -> Option<&str> {
        self.0.get(tool.name()).map(String::as_str)
    }

    pub fn insert(&mut self, tool: ToolKind, version: impl Into<String>) {
        self.0.insert(tool.name().to_string(), version.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Query every known tool, whether or not it is used by the current request.
pub fn get_tool_versions(runner: &dyn ToolRunner, tools: &ToolsConfig) -> ToolVersions {
    let mut versions = ToolVersions::default();
    for tool in ToolKind::ALL {
        let program = match tool {
            ToolKind::Bandit => &tools.bandit,
            ToolKind::Radon => &tools.radon,
        };
        versions.insert(tool, tool_version(runner, tool, program));
    }
    versions
}

fn tool_version(runner: &dyn ToolRunner, tool: ToolKind, program: &str) -> String {
    match runner.run(program, &[OsString::from("--version")]) {
        Ok(output) if output.exited_with(&[0]) && !output.stdout.trim().is_empty() => {
            output.stdout.trim().to_string()
        }
        Ok(output) => {
            tracing::warn!(%tool, status = %output.status_label(), "version query failed");
            UNKNOWN_VERSION.to_string()
        }
        Err(e) => {
            tracing::warn!(%tool, error = %e, "version query failed");
            UNKNOWN_VERSION.to_string()
        }
    }
}
