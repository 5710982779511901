// Shared helpers for debtcleaner integration tests
#![allow(dead_code)]

use debtcleaner::{AnalysisError, AnalysisService, CommandOutput, Settings, ToolRunner};
use serde_json::{json, Map, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded engine invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

impl Call {
    pub fn is_version_query(&self) -> bool {
        self.args.first().map(String::as_str) == Some("--version")
    }
}

/// Stands in for the bandit and radon executables.
///
/// bandit answers with `bandit_report` for any scan. radon answers each
/// sub-command with one entry per file argument: every file gets the same
/// `radon_blocks`, a maintainability index of `80 - 10 * index` and fixed
/// raw counts.
pub struct ScriptedRunner {
    pub bandit_report: Value,
    pub bandit_status: i32,
    pub radon_blocks: Vec<Value>,
    pub radon_available: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self {
            bandit_report: json!({ "errors": [], "results": [] }),
            bandit_status: 0,
            radon_blocks: Vec::new(),
            radon_available: true,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedRunner {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Scan invocations only, version queries excluded
    pub fn scan_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !call.is_version_query())
            .collect()
    }

    pub fn scanned_programs(&self) -> Vec<String> {
        let mut programs: Vec<String> = self.scan_calls().into_iter().map(|c| c.program).collect();
        programs.dedup();
        programs
    }

    fn radon(&self, args: &[String]) -> Result<CommandOutput, AnalysisError> {
        let files = args.iter().skip(1).filter(|arg| arg.ends_with(".py"));
        let mut report = Map::new();
        for (index, file) in files.enumerate() {
            let entry = match args[0].as_str() {
                "cc" => Value::Array(self.radon_blocks.clone()),
                "mi" => json!({ "mi": 80.0 - 10.0 * index as f64, "rank": "A" }),
                "raw" => json!({
                    "loc": 12, "lloc": 9, "sloc": 10, "comments": 1,
                    "multi": 0, "blank": 2, "single_comments": 1
                }),
                other => panic!("unexpected radon sub-command {other}"),
            };
            report.insert(file.clone(), entry);
        }
        Ok(CommandOutput::success(Value::Object(report).to_string()))
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, AnalysisError> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.clone(),
        });

        match (program, args.first().map(String::as_str)) {
            ("radon", _) if !self.radon_available => {
                Err(AnalysisError::tool_not_found("radon", "not on PATH"))
            }
            ("bandit", Some("--version")) => Ok(CommandOutput::success("bandit 1.7.9\n")),
            ("radon", Some("--version")) => Ok(CommandOutput::success("6.0.1\n")),
            ("bandit", _) => Ok(CommandOutput {
                status: Some(self.bandit_status),
                stdout: self.bandit_report.to_string(),
                stderr: String::new(),
            }),
            ("radon", _) => self.radon(&args),
            (other, _) => Err(AnalysisError::tool_not_found(other, "unknown program")),
        }
    }
}

pub fn service_with(runner: Arc<ScriptedRunner>) -> AnalysisService {
    AnalysisService::new(Settings::default(), runner)
}

/// A bandit JSON result entry
pub fn bandit_result(file: &Path, line: u32, severity: &str, test_id: &str) -> Value {
    json!({
        "code": format!("{line} subprocess.call(cmd, shell=True)\n"),
        "col_offset": 4,
        "end_col_offset": 36,
        "filename": file.to_string_lossy(),
        "issue_confidence": "HIGH",
        "issue_cwe": { "id": 78, "link": "https://cwe.mitre.org/data/definitions/78.html" },
        "issue_severity": severity,
        "issue_text": "subprocess call with shell=True identified, security issue.",
        "line_number": line,
        "line_range": [line],
        "more_info": "https://bandit.readthedocs.io/en/latest/plugins/b602_subprocess_popen_with_shell_equals_true.html",
        "test_id": test_id,
        "test_name": "subprocess_popen_with_shell_equals_true"
    })
}

/// Create a temporary project from `(relative path, contents)` pairs
pub fn create_project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    for (relative, contents) in files {
        let path = temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
    }
    let root = temp_dir.path().to_path_buf();
    (temp_dir, root)
}
