//! Handles all user-facing output for the CLI.
//!
//! Centralizing the printing here keeps the report types pure and gives a
//! consistent look across subcommands.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::RunReport;

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints the summary report: one line per failure, the exceptional subset,
/// and the closing verdict line.
pub fn print_report(report: &RunReport) {
    let mut stdout = StandardStream::stdout(color_choice());

    for failure in &report.failures {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(stdout, "FAIL");
        let _ = stdout.reset();
        let marker = if failure.exceptional {
            " (exceptional)"
        } else {
            ""
        };
        let _ = writeln!(
            stdout,
            ": {}{} - {}",
            failure.path.display(),
            marker,
            failure.detail
        );
    }

    if report.failed() {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(
            stdout,
            "\nFailed {} of {} tests",
            report.failures.len(),
            report.total
        );
        let _ = stdout.reset();
        let _ = writeln!(stdout);

        if !report.exceptional.is_empty() {
            let _ = writeln!(stdout, "Exceptional failures (outcome never declared valid):");
            for path in &report.exceptional {
                let _ = writeln!(stdout, "  - {}", path.display());
            }
        }
    } else {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        let _ = write!(stdout, "\nPassed all {} tests", report.total);
        let _ = stdout.reset();
        let _ = writeln!(stdout);
    }
}
