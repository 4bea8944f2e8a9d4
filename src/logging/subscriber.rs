//! Tracing subscriber setup: console output plus a per-command log file.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{log_file_path, timestamp};

/// Target used by [`Logger::stage`](super::Logger::stage) events.
pub(super) const STAGE_TARGET: &str = "pynotes::stage";

/// Environment variable holding an [`EnvFilter`](tracing_subscriber::EnvFilter)
/// directive for the console, e.g. `PYNOTES_LOG=debug`. Overrides `--verbose`.
pub const LOG_ENV: &str = "PYNOTES_LOG";

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.0
}

/// How an event is labelled, independent of where it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Info,
    Debug,
    Warn,
    Error,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if metadata.target() == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "STAGE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// One plain-text log file line.
fn file_line(kind: Kind, time: &str, msg: &str) -> String {
    format!("{time} {:<5} {msg}", kind.tag())
}

/// A [`tracing_subscriber::Layer`] writing every event to
/// `<cache>/pynotes/<command>.log`, replacing the previous run's file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log file for `command` and write the run header.
    ///
    /// `None` if the file cannot be created; logging then stays console-only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("PYNOTES_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(&path).ok()?;
        writeln!(file, "# pynotes {version} `{command}` started {}", timestamp()).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let line = file_line(Kind::of(event.metadata()), &timestamp(), &message_of(event));
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console format: `error:`/`warning:` prefixes, a bold marker for stages,
/// dimmed debug output.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = message_of(event);
        let ansi = writer.has_ansi_escapes();
        let (style, label) = match Kind::of(event.metadata()) {
            Kind::Error => ("\x1b[1;31m", "error: "),
            Kind::Warn => ("\x1b[1;33m", "warning: "),
            Kind::Stage => ("\x1b[1;32m", "» "),
            Kind::Info => return writeln!(writer, "{msg}"),
            Kind::Debug if ansi => return writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
            Kind::Debug => return writeln!(writer, "{msg}"),
        };
        if ansi {
            writeln!(writer, "{style}{label}\x1b[0m{msg}")
        } else {
            writeln!(writer, "{label}{msg}")
        }
    }
}

/// Console filter: [`LOG_ENV`] if set and valid, otherwise `debug` when
/// verbose and `info` when not.
fn console_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    })
}

/// Install the global subscriber. Call once, before any logging.
///
/// Warnings and errors go to stderr, everything else to stdout. The log file
/// always receives debug output regardless of `verbose`.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(writer)
        .with_filter(console_filter(verbose));

    let file = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
