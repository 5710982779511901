pub mod metrics;
pub mod security;

pub use metrics::{ComplexityEntry, MetricsReport, RawMetrics};
pub use security::{Cwe, Issue, SecurityRecord, Severity, NO_ISSUES_MESSAGE};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The analysis engines this service knows how to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Security-issue scanner
    Bandit,
    /// Complexity and maintainability metrics
    Radon,
}

impl ToolKind {
    /// Every known tool, in the order they run when the caller picks none.
    pub const ALL: [ToolKind; 2] = [ToolKind::Bandit, ToolKind::Radon];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Bandit => "bandit",
            ToolKind::Radon => "radon",
        }
    }

    /// Exact, case-sensitive lookup by request name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Native output of one tool, before normalization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Security(Vec<SecurityRecord>),
    Metrics(MetricsReport),
    /// Output of a tool the normalizer has no shape for
    Other(serde_json::Value),
}
