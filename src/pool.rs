//! The bounded worker pool that drives every discovered test to completion.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crate::discovery::TestCase;
use crate::logger::ResultLogger;
use crate::outcome::{Observed, Outcome, ValidOutcomes};
use crate::report::RunRecord;

/// Boxed error surface for executor failures.
pub type ExecError = Box<dyn std::error::Error + Send + Sync>;

/// Runs one test file and reports its outcome.
///
/// Returning `Err` (or panicking) marks the test as crashed: failed,
/// exceptional, and never a match for any expectation.
pub trait TestExecutor: Sync {
    fn execute(&self, path: &Path) -> Result<Outcome, ExecError>;
}

impl<F> TestExecutor for F
where
    F: Fn(&Path) -> Result<Outcome, ExecError> + Sync,
{
    fn execute(&self, path: &Path) -> Result<Outcome, ExecError> {
        self(path)
    }
}

/// A fixed-size pool of worker threads with an explicit concurrency degree.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    concurrency: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(concurrency: NonZeroUsize) -> Self {
        WorkerPool { concurrency }
    }

    /// Executes every case and returns exactly one record per case.
    ///
    /// Blocks until the pool drains: this is the run's join barrier, and no
    /// partial result collection ever escapes it. Workers pull cases
    /// through a shared cursor, so each case is dispatched exactly once,
    /// and every worker constructs its records locally. The only
    /// cross-thread traffic is the record channel, drained single-threaded
    /// here after the join.
    ///
    /// A hung executor blocks its worker indefinitely; the pool applies no
    /// timeout.
    pub fn run(
        &self,
        cases: &[TestCase],
        executor: &dyn TestExecutor,
        valid: &ValidOutcomes,
        logger: &ResultLogger,
    ) -> Vec<RunRecord> {
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<RunRecord>();

        thread::scope(|scope| {
            for _ in 0..self.concurrency.get() {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move || loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(case) = cases.get(index) else {
                        break;
                    };
                    let record = run_case(case, executor, valid);
                    logger.submit(record.log_entry());
                    // The receiver outlives the scope; send cannot fail.
                    let _ = tx.send(record);
                });
            }
        });
        drop(tx);

        rx.iter().collect()
    }
}

/// Executes one case and classifies the result. Executor panics are caught
/// here so a crashing test cannot take its worker (or the pool) down.
fn run_case(case: &TestCase, executor: &dyn TestExecutor, valid: &ValidOutcomes) -> RunRecord {
    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| executor.execute(&case.path)));
    let runtime = start.elapsed();

    let observed = match outcome {
        Ok(Ok(outcome)) => Observed::Returned(outcome),
        Ok(Err(error)) => Observed::Crashed(error.to_string()),
        Err(payload) => Observed::Crashed(panic_message(payload.as_ref())),
    };

    let (passed, exceptional) = match &observed {
        Observed::Returned(outcome) => {
            (case.expectation.matches(outcome), !valid.contains(outcome))
        }
        Observed::Crashed(_) => (false, true),
    };
    // A passing outcome is in its own expectation, hence in the valid union.
    debug_assert!(!passed || !exceptional);

    RunRecord {
        path: case.path.clone(),
        runtime,
        observed,
        passed,
        exceptional,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "executor panicked".to_string()
    }
}
