//! Records produced by the metrics scan adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cyclomatic complexity of one block (function, method or class).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityEntry {
    pub function: String,
    pub start_line: u32,
    pub complexity: u32,
}

/// Raw size counters for one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Lines of code
    pub loc: u32,
    /// Logical lines of code
    pub lloc: u32,
    pub comments: u32,
    pub blank: u32,
}

/// Everything the metrics adapter reports for one scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub cyclomatic_complexity: Vec<ComplexityEntry>,
    /// Maintainability index of the first scanned file; `None` when no file
    /// was scanned
    pub maintainability_index: Option<f64>,
    /// Keyed by file path
    pub raw_metrics: BTreeMap<String, RawMetrics>,
}

impl MetricsReport {
    pub fn functions_analyzed(&self) -> usize {
        self.cyclomatic_complexity.len()
    }
}
