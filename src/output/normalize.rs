//! Merges per-tool outputs into one response shape.
//!
//! The security tool's findings are grouped by file. The metrics tool's
//! `issues_by_file` entry is its flat complexity list, not a per-file
//! grouping; clients depend on that shape.

use crate::core::{
    ComplexityEntry, Issue, MetricsReport, SecurityRecord, Severity, ToolKind, ToolOutput,
};
use crate::versions::ToolVersions;
use indexmap::IndexMap;
use serde::Serialize;

/// Tool name to native output, in the order the tools ran.
pub type RawResults = IndexMap<String, ToolOutput>;

/// Issues per file, in first-seen file order.
pub type FileGroups = IndexMap<String, Vec<Issue>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedResponse {
    pub tools_used: Vec<String>,
    pub tool_versions: ToolVersions,
    pub summary: IndexMap<String, ToolSummary>,
    pub issues_by_file: IndexMap<String, ToolIssues>,
    pub raw: RawResults,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolSummary {
    Security(SecuritySummary),
    Metrics(MetricsSummary),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SecuritySummary {
    pub total_issues: usize,
    pub severities: SeverityCounts,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub functions_analyzed: usize,
    pub maintainability_index: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolIssues {
    ByFile(FileGroups),
    Complexity(Vec<ComplexityEntry>),
}

impl ToolIssues {
    pub fn by_file(&self) -> Option<&FileGroups> {
        match self {
            ToolIssues::ByFile(groups) => Some(groups),
            ToolIssues::Complexity(_) => None,
        }
    }
}

/// Build the normalized response from raw tool outputs.
///
/// `versions` must cover every known tool regardless of which ones ran.
/// Tools without a known shape appear only in `tools_used` and `raw`.
pub fn format_analysis_response(raw: RawResults, versions: ToolVersions) -> NormalizedResponse {
    let mut summary = IndexMap::new();
    let mut issues_by_file = IndexMap::new();

    for (name, output) in &raw {
        match (ToolKind::from_name(name), output) {
            (Some(ToolKind::Bandit), ToolOutput::Security(records)) => {
                let issues: Vec<&Issue> = records
                    .iter()
                    .filter_map(SecurityRecord::as_issue)
                    .collect();
                summary.insert(
                    name.clone(),
                    ToolSummary::Security(SecuritySummary {
                        total_issues: issues.len(),
                        severities: count_severities(issues.iter().copied()),
                    }),
                );
                issues_by_file.insert(
                    name.clone(),
                    ToolIssues::ByFile(group_issues_by_file(issues)),
                );
            }
            (Some(ToolKind::Radon), ToolOutput::Metrics(report)) => {
                summary.insert(
                    name.clone(),
                    ToolSummary::Metrics(summarize_metrics(report)),
                );
                issues_by_file.insert(
                    name.clone(),
                    ToolIssues::Complexity(report.cyclomatic_complexity.clone()),
                );
            }
            (Some(tool), _) => {
                tracing::warn!(%tool, "tool output has an unexpected shape; not summarized");
            }
            (None, _) => {
                tracing::debug!(tool = %name, "no normalizer for tool");
            }
        }
    }

    NormalizedResponse {
        tools_used: raw.keys().cloned().collect(),
        tool_versions: versions,
        summary,
        issues_by_file,
        raw,
    }
}

/// Count LOW/MEDIUM/HIGH case-insensitively; other labels are dropped.
pub fn count_severities<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> SeverityCounts {
    issues
        .into_iter()
        .filter_map(Issue::severity_level)
        .fold(SeverityCounts::default(), |mut counts, severity| {
            counts.record(severity);
            counts
        })
}

/// Group by `file`, keeping encounter order inside each group and
/// first-seen order across groups.
pub fn group_issues_by_file<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> FileGroups {
    issues
        .into_iter()
        .fold(FileGroups::new(), |mut groups, issue| {
            groups
                .entry(issue.file.clone())
                .or_default()
                .push(issue.clone());
            groups
        })
}

fn summarize_metrics(report: &MetricsReport) -> MetricsSummary {
    MetricsSummary {
        functions_analyzed: report.functions_analyzed(),
        maintainability_index: report.maintainability_index,
    }
}
