//! Terminal note-taking.
//!
//! Resolves a notes directory and an editor from `~/.pynotes.ini`, opens or
//! creates notes in that editor, and optionally commits and pushes the notes
//! directory with git afterwards.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: read the INI file and resolve a typed [`config::Config`]
//! - **[`notes`]**: the notes directory and the `daily` / `new` / `edit` operations
//! - **[`git`]**: stage, commit and push after a successful edit
//! - **[`commands`]**: command setup and dispatch from the parsed [`cli`]
//!
//! External processes go through [`exec::Executor`] and logging through
//! [`logging::Log`], so every layer can be exercised with fakes.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod logging;
pub mod notes;
pub mod platform;
