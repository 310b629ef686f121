//! Suite driving: discovery, ordering, the sequential case loop, and the
//! pass/fail tally.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cli::output::Reporter;
use crate::config::SuiteConfig;
use crate::error::{HarnessError, Result};
use crate::pipeline;

/// Running pass/fail counts for one suite invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteTally {
    pub total: usize,
    pub passed: usize,
}

impl SuiteTally {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        }
    }

    /// True when every discovered test passed, including the empty suite.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Recursively scans a directory for test files with the given extension.
///
/// The returned list is sorted lexicographically so run order and output are
/// reproducible across machines and invocations.
pub fn discover_test_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Runs the whole suite: discovery, one pipeline per file in order, tally.
///
/// The compiler must already be built; its absence aborts the run before any
/// case is attempted. A missing test directory is a setup signal: it is
/// created, a hint is printed, and the run ends with an empty (passing)
/// tally. An existing but empty directory is "nothing to do", not a failure.
pub fn run_suite(cfg: &SuiteConfig, reporter: &mut Reporter) -> Result<SuiteTally> {
    if !cfg.compiler.exists() {
        return Err(HarnessError::MissingCompiler(cfg.compiler.clone()));
    }

    if !cfg.test_dir.exists() {
        fs::create_dir_all(&cfg.test_dir)?;
        reporter.note(&format!(
            "Created '{}' directory. Add .{} files there!",
            cfg.test_dir.display(),
            cfg.extension
        ));
        return Ok(SuiteTally::default());
    }

    let files = discover_test_files(&cfg.test_dir, &cfg.extension)?;
    if files.is_empty() {
        reporter.note(&format!(
            "No .{} files found in {}",
            cfg.extension,
            cfg.test_dir.display()
        ));
        return Ok(SuiteTally::default());
    }

    // Strictly sequential: one case at a time, in sorted order.
    let mut tally = SuiteTally::default();
    for file in &files {
        reporter.case_start(file);
        let outcome = pipeline::run_case(cfg, file);
        reporter.case_result(&outcome);
        tally.record(outcome.passed);
    }

    reporter.summary(&tally);
    Ok(tally)
}
