//! Error handling for the heliumt harness.
//!
//! Only conditions that prevent the harness itself from doing its job live
//! here. A test program that fails to compile, exits non-zero, or prints the
//! wrong output is a *verification outcome*, not an error; those are modeled
//! by [`crate::pipeline::FailureKind`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the harness machinery itself.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// An external tool could not be started at all (missing executable,
    /// permission denied). Distinct from the tool running and exiting
    /// non-zero, which is a normal stage result.
    #[error("failed to start '{program}': {source}")]
    Startup {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A test file carried a malformed directive, e.g. `expect-exit: twelve`.
    /// Fatal to that one test case only.
    #[error("bad directive in {file}: {message}")]
    Directive { file: PathBuf, message: String },

    /// The compiler under test is not where the suite expects it.
    /// Fatal to the whole run; no test cases are attempted.
    #[error("compiler not found at '{0}'; build the toolchain first")]
    MissingCompiler(PathBuf),

    /// The test directory could not be read or walked.
    #[error("cannot read test directory: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;
