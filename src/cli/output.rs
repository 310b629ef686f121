//! Handles all user-facing output for the runner.
//!
//! One line per case (`Testing <path>... PASS` / `FAIL (<reason>)`), failure
//! detail with expected vs. actual values, a colored diff for multi-line
//! output mismatches, and the final summary line. Centralizing output here
//! keeps the suite driver free of formatting concerns.

use std::io::Write;
use std::path::Path;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::pipeline::{CaseOutcome, Failure, FailureDetail, FailureKind};
use crate::suite::SuiteTally;

/// Renders per-case and summary results to stdout.
pub struct Reporter {
    stdout: StandardStream,
}

impl Reporter {
    pub fn new(use_colors: bool) -> Self {
        let choice = if use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    /// Prints the case header without a newline, so the verdict lands on the
    /// same line once the pipeline finishes.
    pub fn case_start(&mut self, path: &Path) {
        let _ = write!(self.stdout, "Testing {}... ", path.display());
        let _ = self.stdout.flush();
    }

    pub fn case_result(&mut self, outcome: &CaseOutcome) {
        match &outcome.failure {
            None => {
                self.colored_line("PASS", Color::Green);
            }
            Some(failure) => {
                self.colored_line(&format!("FAIL ({})", failure.kind), Color::Red);
                self.print_failure(failure);
            }
        }
    }

    /// Informational message outside the per-case protocol (setup hints,
    /// "no tests found").
    pub fn note(&mut self, message: &str) {
        let _ = writeln!(self.stdout, "{message}");
    }

    pub fn summary(&mut self, tally: &SuiteTally) {
        let _ = writeln!(self.stdout, "{}", "-".repeat(30));
        let _ = writeln!(self.stdout, "Result: {}/{} passed", tally.passed, tally.total);
    }

    fn colored_line(&mut self, text: &str, color: Color) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = writeln!(self.stdout, "{text}");
        let _ = self.stdout.reset();
    }

    fn print_failure(&mut self, failure: &Failure) {
        match &failure.detail {
            FailureDetail::Stderr(text) => {
                let text = text.trim_end();
                if !text.is_empty() {
                    let _ = writeln!(self.stdout, "{text}");
                }
            }
            FailureDetail::Message(message) => {
                let _ = writeln!(self.stdout, "  {message}");
            }
            FailureDetail::Mismatch { expected, actual } => {
                let _ = writeln!(self.stdout, "  Expected: {expected}");
                let _ = writeln!(self.stdout, "  Actual:   {actual}");
                let multiline = expected.contains('\n') || actual.contains('\n');
                if failure.kind == FailureKind::Output && multiline {
                    let _ = writeln!(self.stdout, "  Diff:");
                    self.print_diff(expected, actual);
                }
            }
        }
    }

    fn print_diff(&mut self, expected: &str, actual: &str) {
        let changeset = Changeset::new(expected, actual, "\n");
        for diff in &changeset.diffs {
            match diff {
                Difference::Same(x) => {
                    let _ = self.stdout.reset();
                    let _ = writeln!(self.stdout, "    {x}");
                }
                Difference::Rem(x) => {
                    let _ = self
                        .stdout
                        .set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                    let _ = writeln!(self.stdout, "   -{x}");
                }
                Difference::Add(x) => {
                    let _ = self
                        .stdout
                        .set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                    let _ = writeln!(self.stdout, "   +{x}");
                }
            }
        }
        let _ = self.stdout.reset();
    }
}
