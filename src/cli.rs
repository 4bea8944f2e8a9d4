//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::notes::DEFAULT_NOTE_NAME;

/// Top-level CLI entry point for pynotes.
#[derive(Parser, Debug)]
#[command(
    name = "pynotes",
    about = "A simple utility designed to make note taking in the terminal easy",
    version = option_env!("PYNOTES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to read instead of ~/.pynotes.ini
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or open today's daily note
    Daily,
    /// Create a new note
    New {
        /// Name of the new note
        #[arg(default_value = DEFAULT_NOTE_NAME)]
        note_name: String,
    },
    /// Edit an existing note
    Edit {
        /// Name of the note to edit
        note_name: String,
    },
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::New { .. } => "new",
            Self::Edit { .. } => "edit",
        }
    }
}
