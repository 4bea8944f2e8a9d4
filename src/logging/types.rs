//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (direct output through `tracing`)
/// and [`BufferedLog`](super::buffered::BufferedLog) (in-memory capture)
/// implement this trait, so note operations and git sync can log without
/// knowing where the output goes.
pub trait Log: Send + Sync {
    /// Log a stage header (major step of the run).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
