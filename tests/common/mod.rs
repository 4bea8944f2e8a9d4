// Shared helpers for integration tests.
//
// Provides a scripted executor and a temporary-directory-backed environment
// with a fluent config builder, so each integration test can run the note
// commands end to end without spawning an editor or touching git.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, bail};
use pynotes_cli::exec::{ExecResult, Executor};

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: Option<PathBuf>,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// `program arg1 arg2 ...` as a single string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Executor that records invocations instead of running them.
///
/// Every command succeeds unless scripted otherwise with [`fail`](Self::fail)
/// (keyed by `"program subcommand"` or bare program) or
/// [`missing`](Self::missing).
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    invocations: Mutex<Vec<Invocation>>,
    failures: HashMap<String, ExecResult>,
    missing: Vec<String>,
    on_path: Vec<String>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, key: &str, code: i32, output: &str) -> Self {
        self.failures.insert(
            key.to_string(),
            ExecResult {
                stdout: output.to_string(),
                stderr: String::new(),
                success: false,
                code: Some(code),
            },
        );
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn on_path(mut self, program: &str) -> Self {
        self.on_path.push(program.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    fn record(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.invocations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Invocation {
                dir: dir.map(Path::to_path_buf),
                program: program.to_string(),
                args: args.iter().map(ToString::to_string).collect(),
            });
        if self.missing.iter().any(|m| m == program) {
            bail!("failed to execute: {program}");
        }
        let keyed = args
            .first()
            .and_then(|first| self.failures.get(&format!("{program} {first}")));
        Ok(keyed
            .or_else(|| self.failures.get(program))
            .cloned()
            .unwrap_or(ExecResult {
                success: true,
                code: Some(0),
                ..ExecResult::default()
            }))
    }
}

impl Executor for ScriptedExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(Some(dir), program, args)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(None, program, args)
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.iter().any(|p| p == program)
    }
}

/// An isolated home for one test, backed by a [`tempfile::TempDir`].
///
/// Holds a config file at `<tmp>/pynotes.ini` and a notes directory at
/// `<tmp>/notes`. Build one with [`TestEnvBuilder`].
#[derive(Debug)]
pub struct TestEnv {
    pub dir: tempfile::TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("pynotes.ini")
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root().join("notes")
    }

    /// Canonical notes directory, matching how the crate resolves it.
    pub fn canonical_notes_dir(&self) -> PathBuf {
        dunce::canonicalize(self.notes_dir()).expect("canonicalize notes dir")
    }

    /// Write a note into the notes directory, creating it if needed.
    pub fn write_note(&self, filename: &str, contents: &str) {
        std::fs::create_dir_all(self.notes_dir()).expect("create notes dir");
        std::fs::write(self.notes_dir().join(filename), contents).expect("write note");
    }

    /// Argument vector for the binary with `--config` pointing at this env.
    pub fn args(&self, rest: &[&str]) -> Vec<String> {
        let mut args = vec![
            "pynotes".to_string(),
            "--config".to_string(),
            self.config_path().display().to_string(),
        ];
        args.extend(rest.iter().map(ToString::to_string));
        args
    }
}

/// Fluent builder for [`TestEnv`].
#[derive(Debug, Default)]
pub struct TestEnvBuilder {
    editor: Option<String>,
    extension: Option<String>,
    git: Option<(bool, bool)>,
    remote: Option<String>,
    raw: Option<String>,
    no_config: bool,
}

impl TestEnvBuilder {
    pub fn editor(mut self, editor: &str) -> Self {
        self.editor = Some(editor.to_string());
        self
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }

    pub fn git(mut self, use_git: bool, auto_push: bool) -> Self {
        self.git = Some((use_git, auto_push));
        self
    }

    pub fn remote(mut self, remote: &str) -> Self {
        self.remote = Some(remote.to_string());
        self
    }

    /// Write `contents` verbatim instead of a generated config.
    pub fn raw_config(mut self, contents: &str) -> Self {
        self.raw = Some(contents.to_string());
        self
    }

    /// Do not write a config file at all.
    pub fn without_config(mut self) -> Self {
        self.no_config = true;
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            dir: tempfile::tempdir().expect("create temp dir"),
        };
        if self.no_config {
            return env;
        }
        let contents = self.raw.unwrap_or_else(|| {
            let mut ini = format!("[CORE]\nnote_directory = {}\n", env.notes_dir().display());
            if let Some(editor) = &self.editor {
                ini.push_str(&format!("default_editor = {editor}\n"));
            }
            if let Some(ext) = &self.extension {
                ini.push_str(&format!("default_extension = {ext}\n"));
            }
            if let Some((use_git, auto_push)) = self.git {
                ini.push_str(&format!(
                    "\n[GIT]\nuse_git = {use_git}\nauto_push = {auto_push}\n"
                ));
                if let Some(remote) = &self.remote {
                    ini.push_str(&format!("remote = {remote}\n"));
                }
            }
            ini
        });
        std::fs::write(env.config_path(), contents).expect("write config");
        env
    }
}
