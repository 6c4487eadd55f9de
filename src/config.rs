//! Run configuration: suites, concurrency, log destination.
//!
//! Configuration arrives either programmatically (embedding the library) or
//! from a YAML manifest:
//!
//! ```yaml
//! concurrency: 4
//! log: results.csv
//! extension: test
//! suites:
//!   - root: suites/pass
//!     expect: 0
//!   - root: suites/mixed
//!     expect: [0, 2]
//!   - root: suites/tokens
//!     expect: [ok, skip]
//! ```
//!
//! `expect` accepts a scalar or a list; each item is an integer exit status
//! or a string token. Relative suite roots resolve against the manifest's
//! directory.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::HarnessError;
use crate::outcome::{Expectation, Outcome};

/// One configured test suite: a root directory plus the outcome(s) counted
/// as a pass for every test found under it.
#[derive(Debug, Clone)]
pub struct Suite {
    pub root: PathBuf,
    pub expectation: Expectation,
}

/// Harness-wide configuration assembled by the embedding layer.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub suites: Vec<Suite>,
    pub concurrency: NonZeroUsize,
    pub log: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn new(suites: Vec<Suite>) -> Self {
        HarnessConfig {
            suites,
            concurrency: NonZeroUsize::MIN,
            log: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.log = Some(path.into());
        self
    }

    /// Rejects configurations that could only produce an empty run.
    /// Unreadable roots are caught later, during discovery, still before
    /// any test executes.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.suites.is_empty() {
            return Err(HarnessError::config("no test suites configured"));
        }
        Ok(())
    }
}

/// A parsed manifest: the core configuration plus the pieces only the CLI
/// layer consumes.
#[derive(Debug)]
pub struct LoadedManifest {
    pub suites: Vec<Suite>,
    /// Worker count, if the manifest pinned one.
    pub concurrency: Option<NonZeroUsize>,
    pub log: Option<PathBuf>,
    /// File extension selecting test files, if the manifest pinned one.
    pub extension: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    concurrency: Option<usize>,
    #[serde(default)]
    log: Option<PathBuf>,
    #[serde(default)]
    extension: Option<String>,
    suites: Vec<ManifestSuite>,
}

#[derive(Debug, Deserialize)]
struct ManifestSuite {
    root: PathBuf,
    expect: ExpectSpec,
}

/// A scalar expectation or a list of acceptable outcomes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpectSpec {
    One(Outcome),
    Many(Vec<Outcome>),
}

impl From<ExpectSpec> for Expectation {
    fn from(spec: ExpectSpec) -> Self {
        match spec {
            ExpectSpec::One(outcome) => Expectation::One(outcome),
            ExpectSpec::Many(outcomes) => Expectation::any_of(outcomes),
        }
    }
}

/// Loads and validates a YAML manifest.
pub fn load_manifest(path: &Path) -> Result<LoadedManifest, HarnessError> {
    let text = fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    let manifest: Manifest =
        serde_yaml::from_str(&text).map_err(|source| HarnessError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    let concurrency = match manifest.concurrency {
        None => None,
        Some(n) => Some(
            NonZeroUsize::new(n)
                .ok_or_else(|| HarnessError::config("concurrency must be at least 1"))?,
        ),
    };

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let suites = manifest
        .suites
        .into_iter()
        .map(|suite| Suite {
            root: base.join(&suite.root),
            expectation: suite.expect.into(),
        })
        .collect();

    Ok(LoadedManifest {
        suites,
        concurrency,
        log: manifest.log.map(|p| base.join(p)),
        extension: manifest.extension,
    })
}
