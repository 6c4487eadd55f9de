//! Defines the command-line arguments and subcommands for the gauntlet CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "gauntlet",
    version,
    about = "A concurrent, file-based test harness."
)]
pub struct GauntletArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover and run every test named by the manifest.
    Run {
        /// Path to the YAML run manifest.
        #[arg(required = true)]
        manifest: PathBuf,
        /// Number of worker threads. Defaults to the manifest value, then
        /// to the number of CPUs.
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Write per-test results to this CSV file, overriding the manifest.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Write the summary report as JSON to this file.
        #[arg(long)]
        json_report: Option<PathBuf>,
    },
    /// List the tests the manifest would run, without running them.
    List {
        /// Path to the YAML run manifest.
        #[arg(required = true)]
        manifest: PathBuf,
    },
}
