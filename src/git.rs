//! Stage, commit and optionally push the notes directory after an edit.
//!
//! Sync runs as a short state machine: Disabled → nothing; otherwise
//! Committing (`git add .`, `git commit`) and, with `auto_push`, Pushing
//! (`git push -u <remote>`). Every git command runs inside the notes
//! directory.
//!
//! A commit that fails only because there was nothing to commit counts as
//! success, and the push is still attempted: earlier local commits may not
//! have reached the remote yet.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::exec::{ExecResult, Executor};
use crate::logging::Log;

/// Prefix of every commit message.
pub const COMMIT_PREFIX: &str = "PyNote Update";

const NOTHING_TO_COMMIT: &str = "nothing to commit";

/// How a sync attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// `use_git` is off; no command was run.
    Disabled,
    /// Changes were committed and pushing is off.
    Committed,
    /// There was nothing to commit and pushing is off.
    NothingToCommit,
    /// The push succeeded.
    Pushed,
    /// A git step failed; later steps were skipped.
    Failed,
}

/// Git settings bound to the notes directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSync {
    enabled: bool,
    auto_push: bool,
    remote: String,
    dir: PathBuf,
}

impl GitSync {
    /// Build from the loaded configuration for the notes directory `dir`.
    #[must_use]
    pub fn new(config: &Config, dir: &Path) -> Self {
        Self {
            enabled: config.use_git,
            auto_push: config.auto_push,
            remote: config.remote.clone(),
            dir: dir.to_path_buf(),
        }
    }

    /// Sync using the current local time in the commit message.
    pub fn sync(&self, executor: &dyn Executor, log: &dyn Log) -> SyncOutcome {
        self.sync_at(chrono::Local::now().naive_local(), executor, log)
    }

    /// Sync with `now` as the commit timestamp.
    pub fn sync_at(
        &self,
        now: NaiveDateTime,
        executor: &dyn Executor,
        log: &dyn Log,
    ) -> SyncOutcome {
        if !self.enabled {
            log.warn("git sync disabled");
            return SyncOutcome::Disabled;
        }

        log.stage("Syncing notes");

        if self.git(executor, log, &["add", "."]).is_none() {
            return SyncOutcome::Failed;
        }

        let message = commit_message(now);
        let committed = match self.git_raw(executor, &["commit", "-m", &message]) {
            Ok(r) if r.success => {
                log.info(&format!("committed: {message}"));
                SyncOutcome::Committed
            }
            Ok(r) if r.combined_output().contains(NOTHING_TO_COMMIT) => {
                log.info("no changes to commit");
                SyncOutcome::NothingToCommit
            }
            Ok(r) => {
                log.error(&failure("git commit", &r));
                return SyncOutcome::Failed;
            }
            Err(e) => {
                log.error(&format!("{e:#}"));
                return SyncOutcome::Failed;
            }
        };

        if !self.auto_push {
            return committed;
        }

        match self.git(executor, log, &["push", "-u", &self.remote]) {
            Some(_) => {
                log.info(&format!("pushed to {}", self.remote));
                SyncOutcome::Pushed
            }
            None => SyncOutcome::Failed,
        }
    }

    /// Run a git step, logging any failure. `None` means the step failed.
    fn git(&self, executor: &dyn Executor, log: &dyn Log, args: &[&str]) -> Option<ExecResult> {
        let label = format!("git {}", args.first().copied().unwrap_or_default());
        match self.git_raw(executor, args) {
            Ok(r) if r.success => Some(r),
            Ok(r) => {
                log.error(&failure(&label, &r));
                None
            }
            Err(e) => {
                log.error(&format!("{e:#}"));
                None
            }
        }
    }

    fn git_raw(&self, executor: &dyn Executor, args: &[&str]) -> anyhow::Result<ExecResult> {
        executor.run_in(&self.dir, "git", args)
    }
}

/// Commit message for a sync at `now`: `PyNote Update: YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn commit_message(now: NaiveDateTime) -> String {
    format!("{COMMIT_PREFIX}: {}", now.format("%Y-%m-%d %H:%M:%S"))
}

fn failure(label: &str, result: &ExecResult) -> String {
    format!(
        "could not sync notes: {label} failed (exit {}): {}",
        result.code.unwrap_or(-1),
        result.combined_output().trim()
    )
}
