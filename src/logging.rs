//! Diagnostic logging on `tracing`.
//!
//! Every event is rendered as `<file>:<line> <TAG> <text>` where the tag is
//! one of the [`Severity`] names. Protocol traffic is logged on the
//! [`WIRE_TARGET`] target and tagged `LOG`.
//!
//! ```rust,ignore
//! let guard = slbot::logging::init(&config.logging)?;
//! tracing::warn!("module limit reached");
//! // src/main.rs:42 WRN module limit reached
//! drop(guard); // flushes the log file
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use crate::config::LoggingConfig;

/// Target used for mirrored protocol traffic.
pub const WIRE_TARGET: &str = "slbot::wire";

/// Timestamp layout for chat log lines.
pub const CHAT_TIME_FORMAT: &str = "%F - %H:%M:%S";

/// Diagnostic severities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Normal operational messages.
    Msg,
    /// Recoverable problems.
    Wrn,
    /// Failures, including missing resources.
    Err,
    /// Verbose detail.
    Ver,
    /// Protocol traffic and chat lines.
    Log,
    /// Suppresses output.
    None,
}

impl Severity {
    /// The three-letter tag written into each line.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Msg => "MSG",
            Self::Wrn => "WRN",
            Self::Err => "ERR",
            Self::Ver => "VER",
            Self::Log => "LOG",
            Self::None => "",
        }
    }

    /// Classify an event by its target and level.
    pub fn from_metadata(meta: &Metadata<'_>) -> Self {
        if meta.target() == WIRE_TARGET {
            return Self::Log;
        }
        match *meta.level() {
            Level::ERROR => Self::Err,
            Level::WARN => Self::Wrn,
            Level::INFO => Self::Msg,
            _ => Self::Ver,
        }
    }

    /// Filter directive admitting this severity and everything above it.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Msg | Self::Log => "info",
            Self::Wrn => "warn",
            Self::Err => "error",
            Self::Ver => "debug",
            Self::None => "off",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "msg" => Ok(Severity::Msg),
            "wrn" => Ok(Severity::Wrn),
            "err" => Ok(Severity::Err),
            "ver" => Ok(Severity::Ver),
            "log" => Ok(Severity::Log),
            "none" => Ok(Severity::None),
            _ => Err(()),
        }
    }
}

/// Event formatter producing `<file>:<line> <TAG> <fields>\n`.
///
/// The newline is only added when the fields don't already end with one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagFormat;

impl<S, N> FormatEvent<S, N> for DiagFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{}:{} {} ",
            meta.file().unwrap_or("?"),
            meta.line().unwrap_or(0),
            Severity::from_metadata(meta).tag()
        )?;
        let mut fields = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut fields), event)?;
        writer.write_str(&fields)?;
        if fields.ends_with('\n') {
            Ok(())
        } else {
            writeln!(writer)
        }
    }
}

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Turn the configured level into a filter directive.
///
/// Severity names (`msg`, `wrn`, `err`, `ver`, `log`, `none`) are accepted
/// alongside plain tracing directives.
pub fn filter_directive(level: &str) -> String {
    match level.parse::<Severity>() {
        Ok(severity) => severity.directive().to_string(),
        Err(()) => level.to_string(),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. The returned guard must be
/// held until shutdown; dropping it flushes the log file.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let stdout_layer = config
        .stdout
        .then(|| tfmt::layer().event_format(DiagFormat).with_writer(std::io::stdout));

    let (file_layer, guard) = match config.file_path() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tfmt::layer()
                .event_format(DiagFormat)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Render a chat event for the log: `<channel> [<time>] <<nick>> <text>`.
pub fn chat_line<Tz>(channel: &str, nick: &str, text: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "{} [{}] <{}> {}",
        channel,
        at.format(CHAT_TIME_FORMAT),
        nick,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn captured(emit: impl FnOnce()) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(
            tfmt::layer()
                .event_format(DiagFormat)
                .with_writer(capture.clone()),
        );
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_diag_format_prefixes_call_site_and_tag() {
        let out = captured(|| tracing::warn!("disk is {}", "full"));
        assert!(out.contains("logging.rs:"), "{out}");
        assert!(out.ends_with(" WRN disk is full\n"), "{out}");
    }

    #[test]
    fn test_terminated_message_gets_no_extra_newline() {
        let out = captured(|| {
            tracing::info!("already terminated\n");
            tracing::info!("bare");
        });
        assert!(!out.contains("\n\n"), "{out:?}");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" MSG already terminated"), "{out:?}");
        assert!(lines[1].ends_with(" MSG bare"), "{out:?}");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_wire_target_tagged_log() {
        let out = captured(|| {
            tracing::info!(target: WIRE_TARGET, "PONG :abc");
            tracing::error!("couldn't open data/insults.txt");
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" LOG PONG :abc"));
        assert!(lines[1].ends_with(" ERR couldn't open data/insults.txt"));
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(Severity::Err.to_string(), "ERR");
        assert_eq!(Severity::Ver.tag(), "VER");
        assert_eq!(Severity::None.tag(), "");
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("none"), "off");
        assert_eq!(filter_directive("WRN"), "warn");
        assert_eq!(filter_directive("slbot=debug"), "slbot=debug");
    }

    #[test]
    fn test_chat_line() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            chat_line("#rust", "alice", "!ping", &at),
            "#rust [2024-03-09 - 07:05:01] <alice> !ping"
        );
    }
}
