//! Log file location and timestamps.
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pynotes";

/// Base cache directory: `$XDG_CACHE_HOME` when it is an absolute path,
/// otherwise `<home>/.cache`.
fn cache_base(xdg_cache_home: Option<&str>, home: Option<&Path>) -> Option<PathBuf> {
    xdg_cache_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".cache")))
}

/// Log file for `command`: `<cache>/pynotes/<command>.log`.
///
/// Creates the directory. `None` if no cache location is known or it cannot
/// be created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let xdg = std::env::var("XDG_CACHE_HOME").ok();
    let dir = cache_base(xdg.as_deref(), crate::config::home_dir().as_deref())?.join(APP_DIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
