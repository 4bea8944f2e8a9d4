//! Top-level command orchestration: setup shared by every subcommand, then
//! dispatch to the matching note operation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::{Cli, Command};
use crate::config::{self, Config};
use crate::error::NoteError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::notes::{NoteDirectory, Notes};
use crate::platform::Platform;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection, configuration loading, and notes
/// directory creation so each subcommand starts from the same place.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved configuration.
    pub config: Config,
    /// The ensured notes directory.
    pub directory: NoteDirectory,
}

impl CommandSetup {
    /// Load the config at `config_path` and ensure the notes directory exists.
    ///
    /// Never fails: every problem here is logged and defaults apply.
    pub fn init(config_path: &Path, executor: &dyn Executor, log: &dyn Log) -> Self {
        let platform = Platform::detect();
        log.debug(&format!("platform: {}", platform.os));

        let config = Config::load(config_path, &platform, executor, log);
        log.debug(&format!(
            "notes directory: {}, extension: {}, git: {}, push: {}",
            config.note_directory.display(),
            config.default_extension,
            config.use_git,
            config.auto_push
        ));

        let directory = NoteDirectory::ensure(&config.note_directory, log);
        Self { config, directory }
    }
}

/// Config path from `--config`, or [`config::DEFAULT_CONFIG_PATH`], with `~`
/// expanded.
#[must_use]
pub fn config_path(cli: &Cli) -> PathBuf {
    let raw = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    config::expand_tilde(&raw)
}

/// Run the parsed command line. `Ok(true)` means the note operation succeeded.
///
/// # Errors
///
/// Returns a [`NoteError`] for usage errors (an empty note name).
pub fn run(cli: &Cli, executor: &dyn Executor, log: &dyn Log) -> Result<bool, NoteError> {
    let setup = CommandSetup::init(&config_path(cli), executor, log);
    let notes = Notes::new(&setup.config, setup.directory, executor, log);
    dispatch(&cli.command, &notes, chrono::Local::now().date_naive())
}

/// Invoke the note operation for `command`. `today` names the daily note.
///
/// # Errors
///
/// Returns a [`NoteError`] for usage errors (an empty note name).
pub fn dispatch(command: &Command, notes: &Notes<'_>, today: NaiveDate) -> Result<bool, NoteError> {
    match command {
        Command::Daily => notes.daily(today),
        Command::New { note_name } => notes.new_note(note_name),
        Command::Edit { note_name } => notes.edit(note_name),
    }
}
