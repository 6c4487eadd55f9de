//! Unified error type for all harness failure modes.
//!
//! Only configuration-level problems surface through [`HarnessError`]: bad
//! suite roots, unparseable manifests, a log destination that cannot be
//! opened. Per-test failures are never errors at this level; they are
//! captured into run records and reported in the summary.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// Fatal before any test is dispatched. A silently tolerated
    /// configuration problem (missing root, empty run) would read as a
    /// false "all passed" signal.
    #[error("configuration error: {message}")]
    #[diagnostic(code(gauntlet::config))]
    Config { message: String },

    #[error("failed to load manifest '{}'", .path.display())]
    #[diagnostic(
        code(gauntlet::manifest),
        help("the manifest must be a YAML document with a `suites` list")
    )]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error on '{}'", .path.display())]
    #[diagnostic(code(gauntlet::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result logger failed: {message}")]
    #[diagnostic(code(gauntlet::logger))]
    Logger { message: String },
}

impl HarnessError {
    pub fn config(message: impl Into<String>) -> Self {
        HarnessError::Config {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}
