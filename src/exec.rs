//! External process execution behind the [`Executor`] trait.
//!
//! The editor and git are the only side effects pynotes has besides creating
//! the notes directory. Routing them through [`Executor`] lets the note
//! operations and git sync be tested without launching real processes.

use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Output};

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (empty for interactive commands).
    pub stdout: String,
    /// Captured standard error (empty for interactive commands).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Standard output followed by standard error.
    #[must_use]
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution.
///
/// A non-zero exit is reported through [`ExecResult::success`], never as an
/// `Err`; errors mean the process could not be started at all.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args` in `dir`, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run `program` with `args` attached to the user's terminal and wait for
    /// it to exit. Output is not captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
        Ok(ExecResult::from(output))
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Shared fakes for unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::{ExecResult, Executor};

    /// A single recorded invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        /// Working directory, `None` for interactive runs.
        pub dir: Option<PathBuf>,
        /// Program name.
        pub program: String,
        /// Arguments.
        pub args: Vec<String>,
    }

    impl Call {
        /// The program followed by its arguments.
        #[must_use]
        pub fn argv(&self) -> Vec<&str> {
            std::iter::once(self.program.as_str())
                .chain(self.args.iter().map(String::as_str))
                .collect()
        }
    }

    /// Executor that records every call and answers from canned responses.
    ///
    /// Responses are looked up by `"<program> <first arg>"` first, then by
    /// the bare program name; unknown commands succeed silently.
    #[derive(Debug, Default)]
    pub struct RecordingExecutor {
        calls: Mutex<Vec<Call>>,
        responses: HashMap<String, ExecResult>,
        on_path: Vec<String>,
        missing: Vec<String>,
    }

    impl RecordingExecutor {
        /// Create an executor with no canned responses and nothing on `PATH`.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `key` (e.g. `"git commit"`) with `result`.
        #[must_use]
        pub fn with_response(mut self, key: &str, result: ExecResult) -> Self {
            self.responses.insert(key.to_string(), result);
            self
        }

        /// Report `program` as present on `PATH`.
        #[must_use]
        pub fn with_on_path(mut self, program: &str) -> Self {
            self.on_path.push(program.to_string());
            self
        }

        /// Make every attempt to start `program` fail as if it were not installed.
        #[must_use]
        pub fn with_missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        /// Every call made so far, in order.
        #[must_use]
        pub fn calls(&self) -> Vec<Call> {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }

        fn respond(
            &self,
            dir: Option<&Path>,
            program: &str,
            args: &[&str],
        ) -> anyhow::Result<ExecResult> {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(Call {
                    dir: dir.map(Path::to_path_buf),
                    program: program.to_string(),
                    args: args.iter().map(ToString::to_string).collect(),
                });
            if self.missing.iter().any(|p| p == program) {
                anyhow::bail!("failed to execute: {program}");
            }
            let specific = args.first().map(|a| format!("{program} {a}"));
            Ok(specific
                .and_then(|key| self.responses.get(&key))
                .or_else(|| self.responses.get(program))
                .cloned()
                .unwrap_or_else(ok))
        }
    }

    impl Executor for RecordingExecutor {
        fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            self.respond(Some(dir), program, args)
        }

        fn run_interactive(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            self.respond(None, program, args)
        }

        fn which(&self, program: &str) -> bool {
            self.on_path.iter().any(|p| p == program)
        }
    }

    /// A successful, silent result.
    #[must_use]
    pub fn ok() -> ExecResult {
        ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        }
    }

    /// A failed result with the given exit code and output.
    #[must_use]
    pub fn failed(code: i32, stdout: &str, stderr: &str) -> ExecResult {
        ExecResult {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            success: false,
            code: Some(code),
        }
    }
}
