//! Security scan adapter.
//!
//! Runs `bandit -f json` over one file, or over every source file found
//! under a directory in batches of up to [`DEFAULT_BATCH_SIZE`] files, and
//! turns each reported finding into an [`Issue`]. An empty scan yields the
//! single "No issues found." notice.

use super::{
    batches, parse_report, path_args, require_exit, Analyzer, ScanOptions, DEFAULT_BATCH_SIZE,
};
use crate::core::{Cwe, Issue, SecurityRecord, ToolKind, ToolOutput};
use crate::errors::Result;
use crate::io::traits::ToolRunner;
use crate::io::walker::find_source_files;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// bandit exits 1 when it reports findings.
const ACCEPTED_EXIT_CODES: &[i32] = &[0, 1];

pub struct BanditAnalyzer {
    runner: Arc<dyn ToolRunner>,
    program: String,
    extensions: Vec<String>,
    batch_size: usize,
}

impl BanditAnalyzer {
    pub fn new(runner: Arc<dyn ToolRunner>, program: String, extensions: Vec<String>) -> Self {
        Self {
            runner,
            program,
            extensions,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Scan `path` and return the adapter's records.
    pub fn scan(&self, path: &Path, options: &ScanOptions) -> Result<Vec<SecurityRecord>> {
        let root = std::path::absolute(path)?;
        let files = find_source_files(&root, &self.extensions);
        if files.is_empty() {
            tracing::debug!(path = %root.display(), "no source files to scan");
            return Ok(vec![SecurityRecord::no_issues()]);
        }

        tracing::info!(files = files.len(), path = %root.display(), "running security scan");
        let mut report = BanditReport::default();
        for batch in batches(&files, self.batch_size) {
            let part = self.run_batch(batch, options)?;
            report.results.extend(part.results);
            report.errors.extend(part.errors);
        }
        Ok(report.into_records())
    }

    fn run_batch(&self, files: &[PathBuf], options: &ScanOptions) -> Result<BanditReport> {
        let mut args: Vec<OsString> = vec!["-f".into(), "json".into(), "-q".into()];
        if let Some(config) = &options.config_file {
            args.push("-c".into());
            args.push(config.as_os_str().to_os_string());
        }
        if options.debug {
            args.push("-d".into());
        }
        args.extend(path_args(files));

        let output = self.runner.run(&self.program, &args)?;
        require_exit(ToolKind::Bandit.name(), &output, ACCEPTED_EXIT_CODES)?;
        parse_report(ToolKind::Bandit.name(), &output.stdout)
    }
}

impl Analyzer for BanditAnalyzer {
    fn tool(&self) -> ToolKind {
        ToolKind::Bandit
    }

    fn analyze(&self, path: &Path, options: &ScanOptions) -> Result<ToolOutput> {
        self.scan(path, options).map(ToolOutput::Security)
    }
}

/// Top level of bandit's JSON report. Only the parts the adapter reads.
#[derive(Debug, Default, Deserialize)]
struct BanditReport {
    #[serde(default)]
    results: Vec<BanditResult>,
    /// Files the engine could not process
    #[serde(default)]
    errors: Vec<BanditFileError>,
}

#[derive(Debug, Deserialize)]
struct BanditFileError {
    #[serde(default)]
    filename: String,
    #[serde(default)]
    reason: String,
}

/// One finding as bandit serializes it.
///
/// Fields that older engine releases omit fall back to defaults:
/// `issue_cwe` -> `None`, `end_col_offset` -> `None`, `code` and
/// `more_info` -> empty string, `col_offset` -> 0, `line_range` -> empty.
#[derive(Debug, Deserialize)]
struct BanditResult {
    filename: String,
    issue_severity: String,
    issue_confidence: String,
    issue_text: String,
    line_number: u32,
    test_id: String,
    test_name: String,
    #[serde(default)]
    line_range: Vec<u32>,
    #[serde(default)]
    col_offset: u32,
    #[serde(default)]
    end_col_offset: Option<u32>,
    #[serde(default)]
    issue_cwe: Option<BanditCwe>,
    #[serde(default)]
    code: String,
    #[serde(default)]
    more_info: String,
}

#[derive(Debug, Deserialize)]
struct BanditCwe {
    id: u32,
    #[serde(default)]
    link: String,
}

impl BanditReport {
    fn into_records(self) -> Vec<SecurityRecord> {
        for error in &self.errors {
            tracing::warn!(file = %error.filename, reason = %error.reason, "bandit skipped file");
        }

        if self.results.is_empty() {
            return vec![SecurityRecord::no_issues()];
        }
        self.results
            .into_iter()
            .map(|result| SecurityRecord::from(result.into_issue()))
            .collect()
    }
}

impl BanditResult {
    fn into_issue(self) -> Issue {
        let issue = self.render();
        let cwe = self.issue_cwe.map(|cwe| Cwe {
            id: cwe.id,
            link: cwe.link,
        });

        Issue {
            issue,
            severity: self.issue_severity,
            confidence: self.issue_confidence,
            col_offset: self.col_offset,
            end_col_offset: self.end_col_offset,
            description: self.issue_text,
            file: self.filename,
            linerange: self.line_range,
            lineno: self.line_number,
            cwe,
            test: self.test_name,
            test_id: self.test_id,
            code: self.code,
            more_info: self.more_info,
        }
    }

    /// The one-line summary bandit prints for a finding. CWE id 0 means unset.
    fn render(&self) -> String {
        let cwe = match &self.issue_cwe {
            Some(cwe) if cwe.id != 0 => format!("CWE-{} ({})", cwe.id, cwe.link()),
            _ => String::new(),
        };
        let test = if self.test_name.is_empty() {
            &self.test_id
        } else {
            &self.test_name
        };

        format!(
            "Issue: '{}' from {}:{}: CWE: {}, Severity: {} Confidence: {} at {}:{}:{}",
            self.issue_text,
            self.test_id,
            test,
            cwe,
            self.issue_severity,
            self.issue_confidence,
            self.filename,
            self.line_number,
            self.col_offset,
        )
    }
}

impl BanditCwe {
    fn link(&self) -> String {
        if self.link.is_empty() {
            format!("https://cwe.mitre.org/data/definitions/{}.html", self.id)
        } else {
            self.link.clone()
        }
    }
}
