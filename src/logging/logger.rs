//! The production logger: every message becomes a `tracing` event.
use std::path::PathBuf;

use super::subscriber::STAGE_TARGET;
use super::types::Log;
use super::utils::log_file_path;

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger created once in `main` and passed down by reference.
///
/// Every message, debug included, also lands in
/// `$XDG_CACHE_HOME/pynotes/<command>.log` (default
/// `~/.cache/pynotes/<command>.log`), one timestamped line each.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display. The log file itself is created
    /// by [`init_subscriber`](super::subscriber::init_subscriber); this
    /// constructor does not write to it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Point the user at the log file, if there is one.
    pub fn report_log_location(&self) {
        if let Some(hint) = self.log_hint() {
            self.info(&hint);
        }
    }

    fn log_hint(&self) -> Option<String> {
        self.log_file
            .as_ref()
            .map(|path| format!("full log: {}", path.display()))
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major step of the run).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);
}
