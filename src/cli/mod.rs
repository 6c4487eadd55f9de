//! The gauntlet command-line interface.
//!
//! This layer owns everything the core engine treats as pluggable: which
//! files count as tests (by extension), how a test is executed (as a child
//! process whose exit status is its outcome), and how the report maps to an
//! exit code.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::cli::args::{Command, GauntletArgs};
use crate::config::{self, HarnessConfig};
use crate::discovery::ExtensionFilter;
use crate::errors::HarnessError;
use crate::harness::Harness;
use crate::outcome::Outcome;
use crate::pool::{ExecError, TestExecutor};

pub mod args;
pub mod output;

/// File extension selecting test files when the manifest does not pin one.
const DEFAULT_EXTENSION: &str = "test";

/// The main entry point for the CLI. Returns true if the run failed, either
/// with test failures or with a configuration error.
pub fn run() -> bool {
    let args = GauntletArgs::parse();

    let outcome = match args.command {
        Command::Run {
            manifest,
            jobs,
            log,
            json_report,
        } => handle_run(&manifest, jobs, log, json_report),
        Command::List { manifest } => handle_list(&manifest),
    };

    match outcome {
        Ok(failed) => failed,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            true
        }
    }
}

/// Runs each test file as a child process; the outcome is its exit status.
/// Termination by signal has no status and is reported as a crash.
struct ProcessExecutor;

impl TestExecutor for ProcessExecutor {
    fn execute(&self, path: &Path) -> Result<Outcome, ExecError> {
        let status = process::Command::new(path).status()?;
        match status.code() {
            Some(code) => Ok(Outcome::Status(code)),
            None => Err(format!("terminated by signal: {}", status).into()),
        }
    }
}

fn handle_run(
    manifest: &Path,
    jobs: Option<usize>,
    log: Option<PathBuf>,
    json_report: Option<PathBuf>,
) -> Result<bool, HarnessError> {
    let loaded = config::load_manifest(manifest)?;

    let jobs = jobs
        .map(|n| NonZeroUsize::new(n).ok_or_else(|| HarnessError::config("--jobs must be at least 1")))
        .transpose()?;
    let concurrency = jobs.or(loaded.concurrency).unwrap_or_else(default_jobs);

    let filter = ExtensionFilter::new(loaded.extension.as_deref().unwrap_or(DEFAULT_EXTENSION));
    let mut harness_config = HarnessConfig::new(loaded.suites).with_concurrency(concurrency);
    if let Some(path) = log.or(loaded.log) {
        harness_config = harness_config.with_log(path);
    }

    let report = Harness::new(harness_config).run(&filter, &ProcessExecutor)?;
    output::print_report(&report);

    if let Some(path) = json_report {
        let json = report.to_json().expect("serialize run report");
        fs::write(&path, json).map_err(|e| HarnessError::io(path, e))?;
    }

    Ok(report.failed())
}

fn handle_list(manifest: &Path) -> Result<bool, HarnessError> {
    let loaded = config::load_manifest(manifest)?;
    let filter = ExtensionFilter::new(loaded.extension.as_deref().unwrap_or(DEFAULT_EXTENSION));
    let harness = Harness::new(HarnessConfig::new(loaded.suites));

    for case in harness.discover(&filter)? {
        println!("{}", case.path.display());
    }
    Ok(false)
}

fn default_jobs() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
