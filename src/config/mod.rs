//! Configuration loading and resolution.

pub mod editor;
pub mod ini;

use std::path::{Component, Path, PathBuf};

use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

use ini::IniDocument;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "~/.pynotes.ini";
/// Notes directory used when `CORE.note_directory` is absent.
pub const DEFAULT_NOTE_DIRECTORY: &str = "~/notes";
/// Extension used when `CORE.default_extension` is absent.
pub const DEFAULT_EXTENSION: &str = ".md";
/// Remote pushed to when `GIT.remote` is absent.
pub const DEFAULT_REMOTE: &str = "origin";

const CORE: &str = "CORE";
const GIT: &str = "GIT";

/// Typed configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Editor executable, no arguments.
    pub editor: String,
    /// Notes directory with `~` already expanded.
    pub note_directory: PathBuf,
    /// Extension appended to note names, always starting with a dot.
    pub default_extension: String,
    /// Whether to commit after a successful edit.
    pub use_git: bool,
    /// Whether to push after committing.
    pub auto_push: bool,
    /// Remote to push to.
    pub remote: String,
}

impl Config {
    /// Load the config file at `path` and resolve every field.
    ///
    /// Never fails: a missing or malformed file is logged and defaults apply.
    pub fn load(
        path: &Path,
        platform: &Platform,
        executor: &dyn Executor,
        log: &dyn Log,
    ) -> Self {
        let doc = load_document(path, log);
        let env_editor = std::env::var(editor::EDITOR_ENV).ok();
        Self::from_document(&doc, env_editor.as_deref(), platform, executor, log)
    }

    /// Resolve every field from an already parsed document.
    ///
    /// Empty values count as absent. Invalid booleans are logged and treated
    /// as `false`.
    pub fn from_document(
        doc: &IniDocument,
        env_editor: Option<&str>,
        platform: &Platform,
        executor: &dyn Executor,
        log: &dyn Log,
    ) -> Self {
        let value = |section: &str, key: &str| doc.get(section, key).filter(|v| !v.is_empty());

        let resolved = editor::resolve(value(CORE, "default_editor"), env_editor, platform, executor);
        log.debug(&format!(
            "editor: {} ({})",
            resolved.program, resolved.source
        ));

        let note_directory =
            expand_tilde(Path::new(value(CORE, "note_directory").unwrap_or(DEFAULT_NOTE_DIRECTORY)));
        let default_extension =
            normalize_extension(value(CORE, "default_extension").unwrap_or(DEFAULT_EXTENSION));

        Self {
            editor: resolved.program,
            note_directory,
            default_extension,
            use_git: parse_bool(GIT, "use_git", value(GIT, "use_git"), log),
            auto_push: parse_bool(GIT, "auto_push", value(GIT, "auto_push"), log),
            remote: value(GIT, "remote").unwrap_or(DEFAULT_REMOTE).to_string(),
        }
    }
}

/// Read the INI file at `path`, returning an empty document on any error.
///
/// A missing file is only a warning; a malformed one is logged as an error.
/// Either way defaults apply.
pub fn load_document(path: &Path, log: &dyn Log) -> IniDocument {
    match ini::parse_file(path) {
        Ok(doc) => {
            log.debug(&format!("loaded config from {}", path.display()));
            doc
        }
        Err(e @ crate::error::ConfigError::NotFound(_)) => {
            log.warn(&format!("{e}; using defaults"));
            IniDocument::default()
        }
        Err(e) => {
            log.error(&format!("{e}; using defaults"));
            IniDocument::default()
        }
    }
}

/// Replace a leading `~` component with the user's home directory.
///
/// Paths that do not start with `~`, or hosts without `HOME`/`USERPROFILE`,
/// are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let mut components = path.components();
    match (components.next(), home) {
        (Some(Component::Normal(first)), Some(home)) if first == "~" => {
            home.join(components.as_path())
        }
        _ => path.to_path_buf(),
    }
}

/// The user's home directory from `HOME`, or `USERPROFILE` on Windows.
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Prefix a dot if the configured extension lacks one (`md` → `.md`).
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Interpret `true`/`false` case-insensitively; anything else is `false`.
fn parse_bool(section: &str, key: &str, raw: Option<&str>, log: &dyn Log) -> bool {
    match raw.map(str::trim) {
        None => false,
        Some(v) if v.eq_ignore_ascii_case("true") => true,
        Some(v) if v.eq_ignore_ascii_case("false") => false,
        Some(v) => {
            log.warn(&format!(
                "{section}.{key} = {v:?} is not true or false; using false"
            ));
            false
        }
    }
}
