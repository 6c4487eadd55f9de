//! Ties discovery, execution, logging, and aggregation into one run.

use crate::config::HarnessConfig;
use crate::discovery::{self, TestCase, TestFilter};
use crate::errors::HarnessError;
use crate::logger::ResultLogger;
use crate::outcome::ValidOutcomes;
use crate::pool::{TestExecutor, WorkerPool};
use crate::report::{self, RunReport};

pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Harness { config }
    }

    /// Runs the full pipeline to completion and returns the summary report.
    ///
    /// Configuration problems (bad roots, nothing discovered) abort before
    /// any test executes. Individual test failures never do; they surface
    /// in the report.
    pub fn run(
        &self,
        filter: &dyn TestFilter,
        executor: &dyn TestExecutor,
    ) -> Result<RunReport, HarnessError> {
        self.config.validate()?;

        let cases = discovery::discover(&self.config.suites, filter)?;
        let valid = ValidOutcomes::collect(self.config.suites.iter().map(|s| &s.expectation));

        log::info!(
            "running {} tests across {} suites ({} workers)",
            cases.len(),
            self.config.suites.len(),
            self.config.concurrency
        );

        let logger = ResultLogger::spawn(self.config.log.as_deref())?;
        let pool = WorkerPool::new(self.config.concurrency);
        let records = pool.run(&cases, executor, &valid, &logger);
        // Workers have joined, so every entry is queued; finalize drains
        // them all before returning.
        logger.finalize()?;

        debug_assert_eq!(records.len(), cases.len());
        Ok(report::summarize(&records))
    }

    /// Discovery without execution, for listing.
    pub fn discover(&self, filter: &dyn TestFilter) -> Result<Vec<TestCase>, HarnessError> {
        self.config.validate()?;
        discovery::discover(&self.config.suites, filter)
    }
}
