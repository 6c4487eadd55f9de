//! Finds test files under the configured suite roots.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Suite;
use crate::errors::HarnessError;
use crate::outcome::Expectation;

/// A single unit of work: one test file and the outcome(s) accepted for it.
/// Immutable once discovered; consumed exactly once by the worker pool.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub path: PathBuf,
    pub expectation: Expectation,
}

/// Decides whether a file found under a suite root is a test.
pub trait TestFilter: Sync {
    fn is_test(&self, path: &Path) -> bool;
}

impl<F> TestFilter for F
where
    F: Fn(&Path) -> bool + Sync,
{
    fn is_test(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Selects tests by file extension, e.g. `ExtensionFilter::new("test")`.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    pub fn new(extension: impl Into<String>) -> Self {
        ExtensionFilter {
            extension: extension.into(),
        }
    }
}

impl TestFilter for ExtensionFilter {
    fn is_test(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.extension.as_str())
    }
}

/// Walks every configured suite root and emits the test cases found there.
///
/// A root that is missing or unreadable is a configuration error and aborts
/// discovery before any execution begins: a silently skipped root would
/// produce zero tests and a false "all passed" signal. The same guard
/// applies when the walk completes but nothing matched the filter.
///
/// Per-suite file lists are sorted so traversal order is reproducible; the
/// final report re-sorts by path anyway, so execution order never leaks
/// into user-visible output.
pub fn discover(suites: &[Suite], filter: &dyn TestFilter) -> Result<Vec<TestCase>, HarnessError> {
    let mut cases = Vec::new();
    for suite in suites {
        cases.extend(discover_suite(suite, filter)?);
    }
    if cases.is_empty() {
        return Err(HarnessError::config(
            "no tests discovered under the configured suite roots",
        ));
    }
    Ok(cases)
}

fn discover_suite(suite: &Suite, filter: &dyn TestFilter) -> Result<Vec<TestCase>, HarnessError> {
    if !suite.root.is_dir() {
        return Err(HarnessError::config(format!(
            "test root '{}' is not a directory",
            suite.root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&suite.root) {
        let entry = entry.map_err(|e| {
            HarnessError::config(format!(
                "failed to walk test root '{}': {}",
                suite.root.display(),
                e
            ))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !filter.is_test(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();

    log::debug!(
        "discovered {} tests under {}",
        files.len(),
        suite.root.display()
    );

    Ok(files
        .into_iter()
        .map(|path| TestCase {
            path,
            expectation: suite.expectation.clone(),
        })
        .collect())
}
