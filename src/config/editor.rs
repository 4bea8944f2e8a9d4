//! Editor resolution: config, platform, `$EDITOR`, then a `PATH` probe.

use std::fmt;

use crate::exec::Executor;
use crate::platform::Platform;

/// Environment variable conventionally naming the preferred editor.
pub const EDITOR_ENV: &str = "EDITOR";

/// Editor used on Windows when none is configured.
pub const WINDOWS_EDITOR: &str = "notepad.exe";

/// Lightweight editor preferred when it is installed.
pub const LIGHTWEIGHT_EDITOR: &str = "nano";

/// Terminal editor assumed to exist everywhere else.
pub const FALLBACK_EDITOR: &str = "vim";

/// Where the chosen editor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSource {
    /// `CORE.default_editor` in the config file.
    Config,
    /// The platform's standard editor (Windows).
    Platform,
    /// The `EDITOR` environment variable.
    Environment,
    /// Found on `PATH` by probing.
    Probe,
    /// Nothing else matched.
    Fallback,
}

impl fmt::Display for EditorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config file"),
            Self::Platform => write!(f, "platform default"),
            Self::Environment => write!(f, "${EDITOR_ENV}"),
            Self::Probe => write!(f, "found on PATH"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The editor executable to launch, with no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEditor {
    /// Program name or path, used verbatim.
    pub program: String,
    /// How it was chosen.
    pub source: EditorSource,
}

impl ResolvedEditor {
    fn new(program: &str, source: EditorSource) -> Self {
        Self {
            program: program.to_string(),
            source,
        }
    }
}

/// Pick the editor. Never fails.
///
/// 1. `configured`, verbatim, if non-empty
/// 2. [`WINDOWS_EDITOR`] on Windows
/// 3. `env_editor` if non-empty
/// 4. [`LIGHTWEIGHT_EDITOR`] if `executor` finds it on `PATH`
/// 5. [`FALLBACK_EDITOR`]
#[must_use]
pub fn resolve(
    configured: Option<&str>,
    env_editor: Option<&str>,
    platform: &Platform,
    executor: &dyn Executor,
) -> ResolvedEditor {
    if let Some(program) = configured.filter(|s| !s.is_empty()) {
        return ResolvedEditor::new(program, EditorSource::Config);
    }
    if platform.is_windows() {
        return ResolvedEditor::new(WINDOWS_EDITOR, EditorSource::Platform);
    }
    if let Some(program) = env_editor.filter(|s| !s.trim().is_empty()) {
        return ResolvedEditor::new(program, EditorSource::Environment);
    }
    if executor.which(LIGHTWEIGHT_EDITOR) {
        return ResolvedEditor::new(LIGHTWEIGHT_EDITOR, EditorSource::Probe);
    }
    ResolvedEditor::new(FALLBACK_EDITOR, EditorSource::Fallback)
}
