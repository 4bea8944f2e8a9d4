//! Domain-specific error types for pynotes.
//!
//! Internal modules return typed errors ([`ConfigError`], [`NoteError`]) while
//! the executor and command boundaries use [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError: config file missing, unreadable or malformed (never fatal)
//! NoteError:   note name empty or escaping the notes directory
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading the INI configuration file.
///
/// All variants are recoverable: the caller logs them and falls back to
/// defaults.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The INI file contains a syntax error that prevents parsing.
    #[error("invalid INI syntax in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message, including the line number.
        message: String,
    },

    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while resolving a note name to a path.
#[derive(Error, Debug)]
pub enum NoteError {
    /// An empty note name was given. This is a usage error and ends the process.
    #[error("no note name specified")]
    EmptyName,

    /// The note name resolves to a path outside the notes directory.
    #[error("{name} is outside of the notes directory {}", .root.display())]
    OutsideNotesDirectory {
        /// The note name as given (extension included).
        name: String,
        /// The notes directory the name had to stay within.
        root: PathBuf,
    },

    /// The resolved note path cannot be passed to the editor as UTF-8.
    #[error("note path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

impl NoteError {
    /// Whether this error is a usage error that must terminate the process.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::EmptyName)
    }
}
