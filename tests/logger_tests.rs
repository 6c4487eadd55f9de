// Result-log behavior observable through a full harness run. The logger's
// own unit tests cover the channel protocol; these check the wiring.

mod common;

use common::{temp_root, write_suite, ContentExecutor};
use gauntlet::{Expectation, ExtensionFilter, Harness, HarnessConfig, Outcome, Suite};

#[test]
fn run_persists_header_and_one_row_per_test() {
    let root = temp_root();
    let log_dir = temp_root();
    let log_path = log_dir.path().join("results.csv");
    write_suite(
        root.path(),
        &[("a.test", "0"), ("b.test", "1"), ("c.test", "0")],
    );

    let config = HarnessConfig::new(vec![Suite {
        root: root.path().to_path_buf(),
        expectation: Expectation::One(Outcome::Status(0)),
    }])
    .with_log(&log_path);

    let report = Harness::new(config)
        .run(&ExtensionFilter::new("test"), &ContentExecutor::new())
        .unwrap();
    assert_eq!(report.total, 3);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "test,seconds,passed");
    assert_eq!(lines.len(), 4);

    // Column shape: path, float seconds, pass token.
    for line in &lines[1..] {
        let columns: Vec<&str> = line.split(',').collect();
        assert_eq!(columns.len(), 3);
        assert!(columns[1].parse::<f64>().is_ok());
        assert!(columns[2] == "true" || columns[2] == "false");
    }

    let passes = lines[1..].iter().filter(|l| l.ends_with(",true")).count();
    let fails = lines[1..].iter().filter(|l| l.ends_with(",false")).count();
    assert_eq!(passes, 2);
    assert_eq!(fails, 1);
}

#[test]
fn no_destination_means_no_log_file() {
    let root = temp_root();
    write_suite(root.path(), &[("a.test", "0")]);

    let config = HarnessConfig::new(vec![Suite {
        root: root.path().to_path_buf(),
        expectation: Expectation::One(Outcome::Status(0)),
    }]);
    let report = Harness::new(config)
        .run(&ExtensionFilter::new("test"), &ContentExecutor::new())
        .unwrap();

    assert!(!report.failed());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
}

#[test]
fn log_rows_match_run_size_under_concurrency() {
    let root = temp_root();
    let log_dir = temp_root();
    let log_path = log_dir.path().join("results.csv");
    let files: Vec<(String, &str)> = (0..30)
        .map(|i| (format!("t{:02}.test", i), if i % 3 == 0 { "1" } else { "0" }))
        .collect();
    let file_refs: Vec<(&str, &str)> = files.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    write_suite(root.path(), &file_refs);

    let config = HarnessConfig::new(vec![Suite {
        root: root.path().to_path_buf(),
        expectation: Expectation::One(Outcome::Status(0)),
    }])
    .with_concurrency(std::num::NonZeroUsize::new(8).unwrap())
    .with_log(&log_path);

    let report = Harness::new(config)
        .run(&ExtensionFilter::new("test"), &ContentExecutor::with_jitter())
        .unwrap();
    assert_eq!(report.total, 30);

    // Every record landed before run() returned: no drain race to win.
    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.lines().count(), 31);
}
