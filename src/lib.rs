// Export modules for library usage
pub mod analysis;
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod observability;
pub mod output;
pub mod server;
pub mod versions;

// Re-export commonly used types
pub use crate::analysis::{AnalysisRequest, AnalysisService};

pub use crate::analyzers::{get_analyzer, Analyzer, BanditAnalyzer, RadonAnalyzer, ScanOptions};

pub use crate::config::Settings;

pub use crate::core::{
    ComplexityEntry, Cwe, Issue, MetricsReport, RawMetrics, SecurityRecord, Severity, ToolKind,
    ToolOutput,
};

pub use crate::errors::AnalysisError;

pub use crate::io::{CommandOutput, ProcessRunner, ToolRunner};

pub use crate::output::{format_analysis_response, NormalizedResponse, RawResults};

pub use crate::versions::{get_tool_versions, ToolVersions, UNKNOWN_VERSION};
