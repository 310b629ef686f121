//! Expectation extraction from test-file directives.
//!
//! Test files declare their expected behavior inline, with two line-oriented
//! directives:
//!
//! ```text
//! // expect-exit: 3
//! // expect-out: hello
//! ```
//!
//! Matching is substring containment, deliberately agnostic of the
//! surrounding comment syntax: `# expect-exit: 3` in a shell-style file works
//! just as well. Multiple `expect-out` lines concatenate in file order.

use std::fs;
use std::path::Path;

use crate::error::{HarnessError, Result};

/// Marker for the expected process exit code.
pub const EXIT_DIRECTIVE: &str = "expect-exit:";
/// Marker for one line of expected standard output.
pub const OUT_DIRECTIVE: &str = "expect-out:";

/// Expected behavior of one test case, as declared in its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Expected exit code; 0 when no `expect-exit` directive is present.
    pub exit_code: i32,
    /// Expected stdout, trimmed at both ends. Empty means "do not check
    /// output" -- tests that only care about exit codes omit `expect-out`.
    pub output: String,
    /// Whether an `expect-exit` directive was actually present.
    pub exit_code_explicit: bool,
}

impl Default for Expectation {
    fn default() -> Self {
        Self {
            exit_code: 0,
            output: String::new(),
            exit_code_explicit: false,
        }
    }
}

impl Expectation {
    /// Scans the full text of a test file for directives.
    ///
    /// A single pass in file order: `expect-exit` takes the text after the
    /// *last* colon on its line as a base-10 integer; `expect-out` takes
    /// everything after the *first* colon with the leading whitespace run
    /// stripped. The accumulated output is trimmed once at the end.
    pub fn parse(file: &Path, source: &str) -> Result<Self> {
        let mut expectation = Expectation::default();
        let mut output = String::new();

        for line in source.lines() {
            if line.contains(EXIT_DIRECTIVE) {
                let raw = line.rsplit(':').next().unwrap_or("").trim();
                expectation.exit_code =
                    raw.parse().map_err(|_| HarnessError::Directive {
                        file: file.to_path_buf(),
                        message: format!(
                            "expected an integer after '{EXIT_DIRECTIVE}', got '{raw}'"
                        ),
                    })?;
                expectation.exit_code_explicit = true;
            }
            if line.contains(OUT_DIRECTIVE) {
                if let Some((_, rest)) = line.split_once(':') {
                    output.push_str(rest.trim_start());
                    output.push('\n');
                }
            }
        }

        expectation.output = output.trim().to_string();
        Ok(expectation)
    }

    /// Reads a test file and extracts its expectation.
    pub fn parse_file(file: &Path) -> Result<Self> {
        let source = fs::read_to_string(file)?;
        Self::parse(file, &source)
    }

    /// True when verification should compare stdout at all.
    pub fn checks_output(&self) -> bool {
        !self.output.is_empty()
    }
}
