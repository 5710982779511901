pub mod json;
pub mod normalize;

pub use json::output_json;
pub use normalize::{
    count_severities, format_analysis_response, group_issues_by_file, FileGroups, MetricsSummary,
    NormalizedResponse, RawResults, SecuritySummary, SeverityCounts, ToolIssues, ToolSummary,
};
