//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use gauntlet::{ExecError, Outcome, TestExecutor};

pub fn temp_root() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Builds a suite directory: each (name, contents) pair becomes one file.
/// Names may contain subdirectories.
pub fn write_suite(dir: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Interprets each test file's contents as its scripted outcome: an integer
/// exit status, `error:<msg>` for an executor error, `panic:<msg>` for a
/// panic, anything else for a token outcome.
pub struct ContentExecutor {
    /// Sleep up to 20ms per test, keyed off the path, so completion order
    /// diverges from dispatch order.
    pub jitter: bool,
}

impl ContentExecutor {
    pub fn new() -> Self {
        ContentExecutor { jitter: false }
    }

    pub fn with_jitter() -> Self {
        ContentExecutor { jitter: true }
    }
}

impl TestExecutor for ContentExecutor {
    fn execute(&self, path: &Path) -> Result<Outcome, ExecError> {
        if self.jitter {
            let mut hasher = DefaultHasher::new();
            path.hash(&mut hasher);
            std::thread::sleep(Duration::from_millis(hasher.finish() % 20));
        }

        let text = fs::read_to_string(path)?;
        let token = text.trim();
        if let Some(message) = token.strip_prefix("panic:") {
            panic!("{}", message.to_string());
        }
        if let Some(message) = token.strip_prefix("error:") {
            return Err(message.to_string().into());
        }
        if let Ok(code) = token.parse::<i32>() {
            return Ok(Outcome::Status(code));
        }
        Ok(Outcome::Token(token.to_string()))
    }
}
