//! Run records and the deterministic summary reduced from them.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::outcome::Observed;

/// Everything the pool learned about one executed test. Exactly one record
/// exists per discovered test case; records are never mutated after the
/// worker constructs them.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub path: PathBuf,
    pub runtime: Duration,
    pub observed: Observed,
    pub passed: bool,
    /// The observed outcome was never declared valid by any suite.
    /// Implies `!passed`.
    pub exceptional: bool,
}

impl RunRecord {
    /// The persisted projection handed to the result logger.
    pub fn log_entry(&self) -> LogEntry {
        LogEntry {
            path: self.path.clone(),
            seconds: self.runtime.as_secs_f64(),
            passed: self.passed,
        }
    }
}

/// One row of the persisted result log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub path: PathBuf,
    pub seconds: f64,
    pub passed: bool,
}

/// A failed test as it appears in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub exceptional: bool,
    pub detail: String,
}

/// Deterministic summary of a completed run. Per-test runtimes are not
/// carried here; they live in the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    /// Every failed test, sorted by path.
    pub failures: Vec<Failure>,
    /// Paths of failures whose outcome no suite anywhere declared valid,
    /// sorted by path.
    pub exceptional: Vec<PathBuf>,
}

impl RunReport {
    /// The process-boundary verdict: did anything fail?
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Reduces a completed, immutable record collection to its report.
///
/// Pure: no I/O, and the same records always produce an identical report
/// regardless of the completion order the pool happened to observe.
pub fn summarize(records: &[RunRecord]) -> RunReport {
    let passed = records.iter().filter(|r| r.passed).count();

    let mut failures: Vec<Failure> = records
        .iter()
        .filter(|r| !r.passed)
        .map(|r| Failure {
            path: r.path.clone(),
            exceptional: r.exceptional,
            detail: failure_detail(r),
        })
        .collect();
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    let mut exceptional: Vec<PathBuf> = records
        .iter()
        .filter(|r| r.exceptional)
        .map(|r| r.path.clone())
        .collect();
    exceptional.sort();

    RunReport {
        total: records.len(),
        passed,
        failures,
        exceptional,
    }
}

fn failure_detail(record: &RunRecord) -> String {
    match &record.observed {
        Observed::Returned(outcome) => format!("unexpected outcome {}", outcome),
        Observed::Crashed(message) => format!("execution failed: {}", message),
    }
}
