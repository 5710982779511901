//! Metrics scan adapter.
//!
//! Runs three radon sub-commands over the same file list:
//! `cc` for per-block cyclomatic complexity, `mi` for the maintainability
//! index and `raw` for size counters. Only the first file's
//! maintainability index is kept; it is not averaged across files.
//!
//! radon itself only measures `.py` files and scripts with a python shebang.
//! Anything else passed explicitly is silently left out of its reports; the
//! adapter logs those files and returns whatever the engine did report.

use super::{
    batches, parse_report, path_args, require_exit, Analyzer, ScanOptions, DEFAULT_BATCH_SIZE,
};
use crate::core::{ComplexityEntry, MetricsReport, RawMetrics, ToolKind, ToolOutput};
use crate::errors::{AnalysisError, Result};
use crate::io::traits::ToolRunner;
use crate::io::walker::find_source_files;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct RadonAnalyzer {
    runner: Arc<dyn ToolRunner>,
    program: String,
    extensions: Vec<String>,
    batch_size: usize,
}

/// A per-file entry in any radon JSON report: either the payload or an
/// error object for files the engine could not parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileResult<T> {
    Failed { error: String },
    Ok(T),
}

#[derive(Debug, Deserialize)]
struct CcBlock {
    name: String,
    lineno: u32,
    complexity: u32,
}

#[derive(Debug, Deserialize)]
struct MiResult {
    mi: f64,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    loc: u32,
    lloc: u32,
    comments: u32,
    blank: u32,
}

type Report<T> = HashMap<String, FileResult<T>>;

impl RadonAnalyzer {
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

    pub fn scan(&self, path: &Path) -> Result<MetricsReport> {
        let files = find_source_files(path, &self.extensions);
        if files.is_empty() {
            tracing::debug!(path = %path.display(), "no source files to measure");
            return Ok(MetricsReport::default());
        }

        tracing::info!(files = files.len(), path = %path.display(), "running metrics scan");
        let cc: Report<Vec<CcBlock>> =
            self.run_subcommand(&["cc", "-j", "-o", "LINES"], &files)?;
        let mi: Report<MiResult> = self.run_subcommand(&["mi", "-j"], &files)?;
        let raw: Report<RawResult> = self.run_subcommand(&["raw", "-j"], &files)?;

        let mut report = MetricsReport::default();
        for file in &files {
            let key = file.to_string_lossy().into_owned();
            let reported =
                cc.contains_key(&key) || mi.contains_key(&key) || raw.contains_key(&key);
            if !reported {
                tracing::warn!(
                    file = %key,
                    "radon skipped file; only .py files and python scripts are measured"
                );
                continue;
            }

            if let Some(blocks) = lookup(&cc, &key)? {
                report
                    .cyclomatic_complexity
                    .extend(blocks.iter().map(|block| ComplexityEntry {
                        function: block.name.clone(),
                        start_line: block.lineno,
                        complexity: block.complexity,
                    }));
            }

            if let Some(result) = lookup(&mi, &key)? {
                report.maintainability_index.get_or_insert(result.mi);
            }

            if let Some(counts) = lookup(&raw, &key)? {
                report.raw_metrics.insert(
                    key,
                    RawMetrics {
                        loc: counts.loc,
                        lloc: counts.lloc,
                        comments: counts.comments,
                        blank: counts.blank,
                    },
                );
            }
        }

        Ok(report)
    }

    /// Run one sub-command over every file, batch by batch, merging the
    /// per-file reports.
    fn run_subcommand<T: DeserializeOwned>(
        &self,
        subcommand: &[&str],
        files: &[PathBuf],
    ) -> Result<Report<T>> {
        let mut merged = Report::new();
        for batch in batches(files, self.batch_size) {
            let mut args: Vec<OsString> = subcommand.iter().map(OsString::from).collect();
            args.extend(path_args(batch));

            let output = self.runner.run(&self.program, &args)?;
            require_exit(ToolKind::Radon.name(), &output, &[0])?;
            let part: Report<T> = parse_report(ToolKind::Radon.name(), &output.stdout)?;
            merged.extend(part);
        }
        Ok(merged)
    }
}

/// Missing keys are skipped; error entries fail the whole scan.
fn lookup<'a, T>(report: &'a Report<T>, key: &str) -> Result<Option<&'a T>> {
    match report.get(key) {
        None => {
            tracing::debug!(file = key, "radon reported nothing for file");
            Ok(None)
        }
        Some(FileResult::Ok(value)) => Ok(Some(value)),
        Some(FileResult::Failed { error }) => Err(AnalysisError::invalid_output(
            ToolKind::Radon.name(),
            format!("{key}: {error}"),
        )),
    }
}

impl Analyzer for RadonAnalyzer {
    fn tool(&self) -> ToolKind {
        ToolKind::Radon
    }

    fn analyze(&self, path: &Path, _options: &ScanOptions) -> Result<ToolOutput> {
        self.scan(path).map(ToolOutput::Metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::traits::CommandOutput;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Answers each radon sub-command from a table keyed by its first arg.
    struct SubcommandRunner {
        responses: HashMap<&'static str, String>,
        calls: Mutex<Vec<String>>,
    }

    impl ToolRunner for SubcommandRunner {
        fn run(&self, _program: &str, args: &[OsString]) -> Result<CommandOutput> {
            let sub = args[0].to_string_lossy().into_owned();
            self.calls.lock().unwrap().push(sub.clone());
            Ok(CommandOutput::success(
                self.responses.get(sub.as_str()).cloned().unwrap_or_default(),
            ))
        }
    }

    fn runner(
        cc: serde_json::Value,
        mi: serde_json::Value,
        raw: serde_json::Value,
    ) -> Arc<SubcommandRunner> {
        Arc::new(SubcommandRunner {
            responses: HashMap::from([
                ("cc", cc.to_string()),
                ("mi", mi.to_string()),
                ("raw", raw.to_string()),
            ]),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn analyzer(runner: Arc<SubcommandRunner>) -> RadonAnalyzer {
        RadonAnalyzer::new(runner, "radon".into(), vec!["py".into()])
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_directory_report_keeps_first_maintainability_index() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.py");
        let b = dir.path().join("b.py");
        std::fs::write(&a, "").unwrap();
        std::fs::write(&b, "").unwrap();

        let runner = runner(
            json!({
                key(&a): [{"type": "function", "name": "handle", "lineno": 3, "complexity": 5}],
                key(&b): [
                    {"type": "class", "name": "Repo", "lineno": 1, "complexity": 2},
                    {"type": "function", "name": "load", "lineno": 9, "complexity": 1}
                ]
            }),
            json!({
                key(&a): {"mi": 71.5, "rank": "A"},
                key(&b): {"mi": 40.0, "rank": "A"}
            }),
            json!({
                key(&a): {
                    "loc": 10, "lloc": 8, "sloc": 9, "comments": 1,
                    "multi": 0, "blank": 1, "single_comments": 1
                },
                key(&b): {
                    "loc": 20, "lloc": 15, "sloc": 18, "comments": 0,
                    "multi": 0, "blank": 2, "single_comments": 0
                }
            }),
        );

        let report = analyzer(runner.clone()).scan(dir.path()).unwrap();

        assert_eq!(report.functions_analyzed(), 3);
        assert_eq!(
            report.cyclomatic_complexity[0],
            ComplexityEntry {
                function: "handle".into(),
                start_line: 3,
                complexity: 5
            }
        );
        assert_eq!(report.maintainability_index, Some(71.5));
        assert_eq!(report.raw_metrics[&key(&b)].loc, 20);
        assert_eq!(report.raw_metrics[&key(&a)].comments, 1);
        assert_eq!(*runner.calls.lock().unwrap(), vec!["cc", "mi", "raw"]);
    }

    #[test]
    fn test_parse_error_fails_scan() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.py");
        std::fs::write(&a, "def (").unwrap();

        let runner = runner(
            json!({ key(&a): {"error": "invalid syntax (<unknown>, line 1)"} }),
            json!({}),
            json!({}),
        );

        let err = analyzer(runner).scan(&a).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidToolOutput { .. }));
    }

    #[test]
    fn test_empty_directory_skips_engine() {
        let dir = TempDir::new().unwrap();
        let runner = runner(json!({}), json!({}), json!({}));

        let report = analyzer(runner.clone()).scan(dir.path()).unwrap();

        assert_eq!(report, MetricsReport::default());
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_file_radon_does_not_measure_yields_empty_report() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("script");
        std::fs::write(&script, "echo hi\n").unwrap();

        let runner = runner(json!({}), json!({}), json!({}));
        let report = analyzer(runner.clone()).scan(&script).unwrap();

        assert_eq!(report, MetricsReport::default());
        assert_eq!(*runner.calls.lock().unwrap(), vec!["cc", "mi", "raw"]);
    }

    #[test]
    fn test_batches_are_merged_in_walk_order() {
        let dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = ["a.py", "b.py", "c.py"]
            .iter()
            .map(|name| dir.path().join(name))
            .collect();
        for file in &files {
            std::fs::write(file, "").unwrap();
        }

        let mut cc = serde_json::Map::new();
        let mut mi = serde_json::Map::new();
        let mut raw = serde_json::Map::new();
        for (index, file) in files.iter().enumerate() {
            let line = index as u32 + 1;
            cc.insert(
                key(file),
                json!([{ "name": format!("f{line}"), "lineno": line, "complexity": line }]),
            );
            mi.insert(key(file), json!({ "mi": 90.0 - index as f64 }));
            raw.insert(
                key(file),
                json!({ "loc": line, "lloc": line, "comments": 0, "blank": 0 }),
            );
        }

        let runner = Arc::new(BatchEchoRunner {
            cc: cc.into(),
            mi: mi.into(),
            raw: raw.into(),
            batches: Mutex::new(Vec::new()),
        });
        let report = RadonAnalyzer::new(runner.clone(), "radon".into(), vec!["py".into()])
            .with_batch_size(2)
            .scan(dir.path())
            .unwrap();

        assert_eq!(
            *runner.batches.lock().unwrap(),
            vec![2, 1, 2, 1, 2, 1],
            "each sub-command runs once per batch"
        );
        let functions: Vec<&str> = report
            .cyclomatic_complexity
            .iter()
            .map(|entry| entry.function.as_str())
            .collect();
        assert_eq!(functions, vec!["f1", "f2", "f3"]);
        assert_eq!(report.maintainability_index, Some(90.0));
        assert_eq!(report.raw_metrics.len(), 3);
    }

    /// Answers each invocation with only the entries for the files it was given.
    struct BatchEchoRunner {
        cc: serde_json::Value,
        mi: serde_json::Value,
        raw: serde_json::Value,
        batches: Mutex<Vec<usize>>,
    }

    impl ToolRunner for BatchEchoRunner {
        fn run(&self, _program: &str, args: &[OsString]) -> Result<CommandOutput> {
            let source = match args[0].to_string_lossy().as_ref() {
                "cc" => &self.cc,
                "mi" => &self.mi,
                _ => &self.raw,
            };
            let files: Vec<String> = args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .filter(|arg| arg.ends_with(".py"))
                .collect();
            self.batches.lock().unwrap().push(files.len());

            let answer: serde_json::Map<String, serde_json::Value> = files
                .into_iter()
                .filter_map(|file| source.get(&file).cloned().map(|value| (file, value)))
                .collect();
            Ok(CommandOutput::success(serde_json::Value::from(answer).to_string()))
        }
    }
}
