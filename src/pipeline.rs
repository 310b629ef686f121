//! The per-case pipeline: compile, assemble, link, execute, verify.
//!
//! Each test case is driven through four external stages with strict
//! short-circuiting: a failure at any stage stops the pipeline and later
//! stages never run. Every error is converted into a [`CaseOutcome`] at this
//! boundary; nothing from one case can abort the suite loop.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::iter;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::expect::Expectation;
use crate::stage::{self, StageResult};

/// Why a test case failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Compile,
    Assemble,
    Link,
    Runtime,
    ExitCode,
    Output,
    Directive,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Compile => "Compilation Error",
            FailureKind::Assemble => "Assembler Error",
            FailureKind::Link => "Linker Error",
            FailureKind::Runtime => "Runtime Error",
            FailureKind::ExitCode => "Wrong Exit Code",
            FailureKind::Output => "Wrong Output",
            FailureKind::Directive => "Bad Directive",
        };
        f.write_str(label)
    }
}

/// Human-readable detail attached to a failure, for the reporter.
#[derive(Debug, Clone)]
pub enum FailureDetail {
    /// The failing stage's stderr, verbatim.
    Stderr(String),
    /// Expected vs. actual values for a verification mismatch.
    Mismatch { expected: String, actual: String },
    /// A one-line harness message (startup or directive problems).
    Message(String),
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: FailureDetail,
}

/// Final verdict for one test case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub passed: bool,
    pub failure: Option<Failure>,
}

impl CaseOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            failure: None,
        }
    }

    fn fail(kind: FailureKind, detail: FailureDetail) -> Self {
        Self {
            passed: false,
            failure: Some(Failure { kind, detail }),
        }
    }
}

/// Intermediate artifact locations for one in-flight test case.
///
/// Each case gets its own temporary directory, so back-to-back (or, in some
/// future, concurrent) cases can never clobber each other's intermediates.
/// The directory and everything in it is removed when the set is dropped,
/// on every exit path.
#[derive(Debug)]
pub struct ArtifactSet {
    dir: TempDir,
    asm: PathBuf,
    obj: PathBuf,
    exe: PathBuf,
}

impl ArtifactSet {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let base = dir.path();
        Ok(Self {
            asm: base.join("case.s"),
            obj: base.join("case.o"),
            exe: base.join("case"),
            dir,
        })
    }

    /// Assembly text produced by the compiler.
    pub fn asm(&self) -> &Path {
        &self.asm
    }

    /// Object file produced by the assembler.
    pub fn obj(&self) -> &Path {
        &self.obj
    }

    /// Executable produced by the linker.
    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Removes any artifact files that exist. Idempotent: artifacts that
    /// were never produced (or were already removed) are skipped.
    pub fn remove_artifacts(&self) -> Result<()> {
        for path in [&self.asm, &self.obj, &self.exe] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Drives one test file through the full pipeline and verifies the result.
pub fn run_case(cfg: &SuiteConfig, file: &Path) -> CaseOutcome {
    let expectation = match Expectation::parse_file(file) {
        Ok(exp) => exp,
        Err(err) => {
            return CaseOutcome::fail(FailureKind::Directive, FailureDetail::Message(err.to_string()))
        }
    };

    let artifacts = match ArtifactSet::new() {
        Ok(set) => set,
        Err(err) => {
            return CaseOutcome::fail(
                FailureKind::Compile,
                FailureDetail::Message(format!("could not create artifact directory: {err}")),
            )
        }
    };

    // 1. Compile: <compiler> -o <asm> <test-file>
    let compile = stage::run_stage(
        &cfg.compiler,
        [OsStr::new("-o"), artifacts.asm().as_os_str(), file.as_os_str()],
    );
    if let Err(outcome) = check_stage(compile, FailureKind::Compile) {
        return outcome;
    }

    // 2. Assemble: <assembler> -f <format> <asm> -o <obj>
    let assemble = stage::run_stage(
        &cfg.assembler,
        [
            OsStr::new("-f"),
            OsStr::new(cfg.object_format.as_str()),
            artifacts.asm().as_os_str(),
            OsStr::new("-o"),
            artifacts.obj().as_os_str(),
        ],
    );
    if let Err(outcome) = check_stage(assemble, FailureKind::Assemble) {
        return outcome;
    }

    // 3. Link: <linker> <obj> -o <exe>
    let link = stage::run_stage(
        &cfg.linker,
        [
            artifacts.obj().as_os_str(),
            OsStr::new("-o"),
            artifacts.exe().as_os_str(),
        ],
    );
    if let Err(outcome) = check_stage(link, FailureKind::Link) {
        return outcome;
    }

    // 4. Execute the produced binary. A spawn failure here is a runtime
    //    error; a non-zero exit is data for verification, not an error.
    let run = match stage::run_stage(artifacts.exe(), iter::empty::<&OsStr>()) {
        Ok(res) => res,
        Err(err) => {
            return CaseOutcome::fail(FailureKind::Runtime, FailureDetail::Message(err.to_string()))
        }
    };

    verify(&expectation, &run)
}

/// Succeeds only on a clean zero exit; anything else becomes a failed
/// outcome tagged with the stage's failure kind.
fn check_stage(
    result: Result<StageResult>,
    kind: FailureKind,
) -> std::result::Result<(), CaseOutcome> {
    match result {
        Ok(res) if res.succeeded() => Ok(()),
        Ok(res) => Err(CaseOutcome::fail(
            kind,
            FailureDetail::Stderr(res.stderr_lossy().into_owned()),
        )),
        Err(err) => Err(CaseOutcome::fail(kind, FailureDetail::Message(err.to_string()))),
    }
}

/// Compares the executed binary against the test's expectation.
///
/// The exit code is always checked; the default 0 is itself a valid
/// expectation. Stdout is compared (trimmed, byte-for-byte) only when the
/// expected output is non-empty.
fn verify(expectation: &Expectation, run: &StageResult) -> CaseOutcome {
    let actual_exit = run.exit_code();
    if actual_exit != expectation.exit_code {
        return CaseOutcome::fail(
            FailureKind::ExitCode,
            FailureDetail::Mismatch {
                expected: expectation.exit_code.to_string(),
                actual: actual_exit.to_string(),
            },
        );
    }

    if expectation.checks_output() {
        let actual_out = run.stdout_lossy();
        let actual_out = actual_out.trim();
        if actual_out != expectation.output {
            return CaseOutcome::fail(
                FailureKind::Output,
                FailureDetail::Mismatch {
                    expected: expectation.output.clone(),
                    actual: actual_out.to_string(),
                },
            );
        }
    }

    CaseOutcome::pass()
}
