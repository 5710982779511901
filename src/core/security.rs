//! Records produced by the security scan adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message carried by the placeholder record of an empty security scan.
pub const NO_ISSUES_MESSAGE: &str = "No issues found.";

/// Severity levels counted in the security summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    /// Case-insensitive parse; anything outside LOW/MEDIUM/HIGH is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weakness classifier attached to a finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cwe {
    pub id: u32,
    pub link: String,
}

/// A single finding reported by the security engine.
///
/// `severity` and `confidence` keep the engine's own labels; the summary
/// interprets them through [`Severity::from_label`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// One-line rendering: `[test_id:test] description`
    pub issue: String,
    pub severity: String,
    pub confidence: String,
    pub col_offset: u32,
    pub end_col_offset: Option<u32>,
    pub description: String,
    pub file: String,
    pub linerange: Vec<u32>,
    pub lineno: u32,
    pub cwe: Option<Cwe>,
    /// Rule name, e.g. `assert_used`
    pub test: String,
    /// Rule identifier, e.g. `B101`
    pub test_id: String,
    /// Source excerpt around the finding
    pub code: String,
    pub more_info: String,
}

impl Issue {
    pub fn severity_level(&self) -> Option<Severity> {
        Severity::from_label(&self.severity)
    }
}

/// One entry of the security adapter's output.
///
/// An empty scan yields exactly one [`SecurityRecord::Notice`]; it is never
/// counted as an issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityRecord {
    Issue(Box<Issue>),
    Notice { message: String },
}

impl SecurityRecord {
    pub fn no_issues() -> Self {
        SecurityRecord::Notice {
            message: NO_ISSUES_MESSAGE.to_string(),
        }
    }

    pub fn as_issue(&self) -> Option<&Issue> {
        match self {
            SecurityRecord::Issue(issue) => Some(issue.as_ref()),
            SecurityRecord::Notice { .. } => None,
        }
    }
}

impl From<Issue> for SecurityRecord {
    fn from(issue: Issue) -> Self {
        SecurityRecord::Issue(Box::new(issue))
    }
}
