//! Durable per-test result logging, decoupled from the worker pool.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::errors::HarnessError;
use crate::report::LogEntry;

/// Column header written at the top of every result log.
const LOG_HEADER: &str = "test,seconds,passed";

/// Appends completed-test records to a log file from a dedicated thread.
///
/// The logger owns exclusive write access to its destination: workers hand
/// entries over a channel and never touch the file, so there is no
/// interleaved-write race to defend against. Submission is fire-and-forget;
/// a worker is never blocked on log I/O.
///
/// Shutdown is an explicit close-drain-join protocol. [`ResultLogger::finalize`]
/// closes the sending side; the writer thread observes the disconnect only
/// after every queued entry has been delivered, so nothing submitted before
/// the close can be lost.
pub struct ResultLogger {
    inner: Option<Active>,
}

struct Active {
    tx: Sender<LogEntry>,
    writer: JoinHandle<()>,
    path: PathBuf,
}

impl ResultLogger {
    /// Starts the writer thread, truncating any previous log at `path` and
    /// writing the header row. With no destination configured the logger is
    /// a no-op sink and submissions are discarded.
    pub fn spawn(destination: Option<&Path>) -> Result<ResultLogger, HarnessError> {
        let Some(path) = destination else {
            return Ok(ResultLogger { inner: None });
        };

        let file = File::create(path).map_err(|e| HarnessError::io(path, e))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", LOG_HEADER).map_err(|e| HarnessError::io(path, e))?;
        out.flush().map_err(|e| HarnessError::io(path, e))?;

        let (tx, rx) = mpsc::channel();
        let log_path = path.to_path_buf();
        let writer = thread::spawn(move || drain(rx, out, &log_path));

        Ok(ResultLogger {
            inner: Some(Active {
                tx,
                writer,
                path: path.to_path_buf(),
            }),
        })
    }

    /// Enqueues one entry without blocking.
    pub fn submit(&self, entry: LogEntry) {
        if let Some(active) = &self.inner {
            // Send fails only if the writer thread is already gone; the
            // entry is dropped either way.
            let _ = active.tx.send(entry);
        }
    }

    /// Closes the channel, waits for the queue to drain, and joins the
    /// writer thread. Every entry submitted before this call is on disk
    /// when it returns. Callers must not finalize until their workers have
    /// stopped submitting.
    pub fn finalize(mut self) -> Result<(), HarnessError> {
        let Some(active) = self.inner.take() else {
            return Ok(());
        };
        drop(active.tx);
        active.writer.join().map_err(|_| HarnessError::Logger {
            message: format!("log writer thread panicked ({})", active.path.display()),
        })
    }
}

/// Writer-thread loop. Flushes after every entry so a crash loses at most
/// the record in flight. A failed write is reported and skipped; it must
/// never propagate back to, or block, the worker that submitted the entry.
fn drain(rx: Receiver<LogEntry>, mut out: BufWriter<File>, path: &Path) {
    while let Ok(entry) = rx.recv() {
        if let Err(e) = write_entry(&mut out, &entry) {
            log::warn!("failed to append to {}: {}", path.display(), e);
        }
    }
}

fn write_entry(out: &mut BufWriter<File>, entry: &LogEntry) -> std::io::Result<()> {
    writeln!(
        out,
        "{},{:.6},{}",
        entry.path.display(),
        entry.seconds,
        entry.passed
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, passed: bool) -> LogEntry {
        LogEntry {
            path: PathBuf::from(name),
            seconds: 0.25,
            passed,
        }
    }

    #[test]
    fn header_then_one_row_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let logger = ResultLogger::spawn(Some(&path)).unwrap();
        logger.submit(entry("a.test", true));
        logger.submit(entry("b.test", false));
        logger.finalize().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], LOG_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("a.test,"));
        assert!(lines[1].ends_with(",true"));
        assert!(lines[2].ends_with(",false"));
    }

    #[test]
    fn finalize_drains_every_queued_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let logger = ResultLogger::spawn(Some(&path)).unwrap();
        for i in 0..200 {
            logger.submit(entry(&format!("t{:03}.test", i), true));
        }
        logger.finalize().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 201);
    }

    #[test]
    fn previous_log_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "stale contents\nfrom an earlier run\n").unwrap();

        let logger = ResultLogger::spawn(Some(&path)).unwrap();
        logger.finalize().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), LOG_HEADER);
    }

    #[test]
    fn disabled_logger_discards_entries() {
        let logger = ResultLogger::spawn(None).unwrap();
        logger.submit(entry("ignored.test", true));
        logger.finalize().unwrap();
    }
}
