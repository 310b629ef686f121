//! External-process stage execution.
//!
//! Every pipeline stage is one child process: spawn, capture both streams,
//! wait. A non-zero exit is a normal, expected outcome carried in the
//! [`StageResult`] for the caller to inspect; only failing to start the
//! process at all surfaces as [`HarnessError::Startup`].

use std::borrow::Cow;
use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{HarnessError, Result};

/// Captured termination state of one external tool invocation.
#[derive(Debug)]
pub struct StageResult {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl StageResult {
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit code, with -1 standing in for termination by signal.
    pub fn exit_code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Runs one external program to completion with stdin closed and both output
/// streams captured in memory. Blocks until the child terminates.
pub fn run_stage<P, I, A>(program: P, args: I) -> Result<StageResult>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| HarnessError::Startup {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

    debug!(
        program = %program.to_string_lossy(),
        status = ?output.status.code(),
        "stage finished"
    );

    Ok(StageResult {
        status: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
