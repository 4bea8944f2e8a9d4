//! Note operations: `daily`, `new` and `edit`.
//!
//! Every operation resolves a name to a path inside the notes directory,
//! hands it to the editor, and syncs with git once the editor exits cleanly.
//! Recoverable failures are logged and reported as `Ok(false)`; only an empty
//! note name is an `Err`, because it is a usage error.

pub mod directory;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::NoteError;
use crate::exec::Executor;
use crate::git::GitSync;
use crate::logging::Log;

pub use directory::NoteDirectory;

/// Name used by `new` when none is given.
pub const DEFAULT_NOTE_NAME: &str = "New_Note";

/// The note operations, bound to a configuration, an executor and a logger.
pub struct Notes<'a> {
    editor: String,
    extension: String,
    directory: NoteDirectory,
    git: GitSync,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Notes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notes")
            .field("editor", &self.editor)
            .field("extension", &self.extension)
            .field("directory", &self.directory)
            .field("git", &self.git)
            .field("executor", &self.executor)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Notes<'a> {
    /// Bind the operations to `config` and an already ensured `directory`.
    #[must_use]
    pub fn new(
        config: &Config,
        directory: NoteDirectory,
        executor: &'a dyn Executor,
        log: &'a dyn Log,
    ) -> Self {
        let git = GitSync::new(config, directory.root());
        Self {
            editor: config.editor.clone(),
            extension: config.default_extension.clone(),
            directory,
            git,
            executor,
            log,
        }
    }

    /// The notes directory.
    #[must_use]
    pub const fn directory(&self) -> &NoteDirectory {
        &self.directory
    }

    /// Open or create the note for `date`, named `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; see [`open`](Self::open).
    pub fn daily(&self, date: NaiveDate) -> Result<bool, NoteError> {
        self.open(&daily_note_name(date))
    }

    /// Open or create the note called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::EmptyName`] if `name` is empty.
    pub fn new_note(&self, name: &str) -> Result<bool, NoteError> {
        self.open(name)
    }

    /// Open the existing note called `name`.
    ///
    /// Returns `Ok(false)` without launching anything if the note does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::EmptyName`] if `name` is empty.
    pub fn edit(&self, name: &str) -> Result<bool, NoteError> {
        let Some(path) = self.resolve(name)? else {
            return Ok(false);
        };
        if !path.exists() {
            self.log.warn(&format!(
                "note `{}` does not exist",
                with_extension(name, &self.extension)
            ));
            return Ok(false);
        }
        Ok(self.launch(&path))
    }

    /// Open or create the note called `name`: resolve its path, run the
    /// editor, and sync if the editor succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::EmptyName`] if `name` is empty.
    pub fn open(&self, name: &str) -> Result<bool, NoteError> {
        let Some(path) = self.resolve(name)? else {
            return Ok(false);
        };
        Ok(self.launch(&path))
    }

    /// Resolve `name` to a path inside the notes directory.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::EmptyName`] for an empty name and
    /// [`NoteError::OutsideNotesDirectory`] if the name escapes the root.
    pub fn note_path(&self, name: &str) -> Result<PathBuf, NoteError> {
        if name.is_empty() {
            return Err(NoteError::EmptyName);
        }
        self.directory
            .safe_path(&with_extension(name, &self.extension))
    }

    /// Like [`note_path`](Self::note_path), but logs containment failures
    /// and maps them to `None`.
    fn resolve(&self, name: &str) -> Result<Option<PathBuf>, NoteError> {
        match self.note_path(name) {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.is_usage() => Err(e),
            Err(e) => {
                self.log.error(&format!("{e}; refusing to write outside it"));
                Ok(None)
            }
        }
    }

    fn launch(&self, path: &Path) -> bool {
        let Some(arg) = path.to_str() else {
            self.log
                .error(&NoteError::NonUtf8Path(path.to_path_buf()).to_string());
            return false;
        };

        self.log.stage(&format!("Opening {}", path.display()));
        self.log.debug(&format!("running {} {arg}", self.editor));

        match self.executor.run_interactive(&self.editor, &[arg]) {
            Ok(result) if result.success => {
                let outcome = self.git.sync(self.executor, self.log);
                self.log.debug(&format!("sync outcome: {outcome:?}"));
                true
            }
            Ok(result) => {
                self.log.error(&format!(
                    "{} exited with code {} while editing {}",
                    self.editor,
                    result.code.unwrap_or(-1),
                    path.display()
                ));
                false
            }
            Err(e) => {
                self.log.error(&format!("could not launch editor: {e:#}"));
                false
            }
        }
    }
}

/// Name of the daily note for `date`: `YYYY-MM-DD`.
#[must_use]
pub fn daily_note_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Append `extension` unless `name` already ends with it.
#[must_use]
pub fn with_extension(name: &str, extension: &str) -> String {
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}
