//! Line-oriented rendering of diagnostic records.

use std::{
    fmt::{self, Write as _},
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Utc};

use super::{Cause, DiagnosticsConfig, Level, escape::push_escaped};

/// Timestamp layout: date, time and milliseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One diagnostic event awaiting rendering.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// Logical source, usually a module path.
    pub name: &'a str,
    /// Thread or task that raised the event.
    pub thread: &'a str,
    /// Message template; see [`FormatMode`](super::FormatMode).
    pub template: Option<&'a str>,
    /// Arguments substituted into the template.
    pub args: &'a [&'a dyn fmt::Display],
    /// Optional error chain rendered after the message.
    pub cause: Option<&'a Cause>,
}

impl<'a> Record<'a> {
    /// Create a record without message, arguments or cause.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, level: Level, name: &'a str, thread: &'a str) -> Self {
        Self {
            timestamp,
            level,
            name,
            thread,
            template: None,
            args: &[],
            cause: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: &'a str) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: &'a [&'a dyn fmt::Display]) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: &'a Cause) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("timestamp", &self.timestamp)
            .field("level", &self.level)
            .field("name", &self.name)
            .field("thread", &self.thread)
            .field("template", &self.template)
            .field("args", &self.args.len())
            .field("cause", &self.cause)
            .finish()
    }
}

/// Renders records as single log lines (plus cause blocks) into a writer.
///
/// Each line reads `timestamp:LEVEL:name:thread: message`, followed by the
/// cause chain when one is attached.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use framesink::diagnostics::{Appender, DiagnosticsConfig, Level, Record};
///
/// let appender = Appender::new(DiagnosticsConfig::default(), Vec::new());
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single().expect("valid time");
/// let line = appender.format(
///     &Record::new(at, Level::Warn, "framesink::pump", "worker-1")
///         .with_template("dropped {} bytes")
///         .with_args(&[&42]),
/// );
/// assert_eq!(line, "2024-05-01 12:30:00.000:WARN:f.pump:worker-1: dropped 42 bytes");
/// ```
#[derive(Debug)]
pub struct Appender<W> {
    config: DiagnosticsConfig,
    out: Mutex<W>,
}

impl<W: Write> Appender<W> {
    /// Create an appender writing to `out`.
    #[must_use]
    pub fn new(config: DiagnosticsConfig, out: W) -> Self {
        Self {
            config,
            out: Mutex::new(out),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DiagnosticsConfig { &self.config }

    /// Render and write `record` followed by a newline.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying writer.
    pub fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let line = self.format(record);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.out
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }

    /// Consume the appender, returning the writer.
    pub fn into_inner(self) -> W { self.out.into_inner().unwrap_or_else(PoisonError::into_inner) }

    /// Render `record` without the trailing newline.
    #[must_use]
    pub fn format(&self, record: &Record<'_>) -> String {
        let escape = self.config.escape_messages;
        let mut line = String::with_capacity(64);

        let local = record.timestamp.with_timezone(&self.config.offset);
        let _ = write!(line, "{}", local.format(TIMESTAMP_FORMAT));
        line.push(':');
        line.push_str(record.level.label());
        line.push(':');
        if self.config.condensed_names {
            push_escaped(&mut line, &condense(record.name), escape);
        } else {
            push_escaped(&mut line, record.name, escape);
        }
        line.push(':');
        push_escaped(&mut line, record.thread, escape);
        line.push_str(": ");

        match self.config.format_mode.format(record.template, record.args) {
            Ok(message) => push_escaped(&mut line, &message, escape),
            Err(err) => {
                push_escaped(&mut line, record.template.unwrap_or_default(), escape);
                let _ = write!(line, " [format error: {err}]");
            }
        }

        if let Some(cause) = record.cause {
            if self.config.hide_stacks {
                line.push_str(": ");
                push_escaped(&mut line, cause.summary(), escape);
            } else {
                self.push_cause(&mut line, cause, "");
            }
        }
        line
    }

    /// Append `cause` as a block at `indent`: its summary, its frames, then
    /// each suppressed cause and the nested cause under their own label lines.
    fn push_cause(&self, line: &mut String, cause: &Cause, indent: &str) {
        let escape = self.config.escape_messages;
        line.push('\n');
        line.push_str(indent);
        push_escaped(line, cause.summary(), escape);

        for frame in cause.frames() {
            line.push('\n');
            line.push_str(indent);
            line.push_str("\tat ");
            push_escaped(line, frame, escape);
        }

        let nested = format!("\t|{indent}");
        for suppressed in cause.suppressed() {
            line.push('\n');
            line.push_str(indent);
            line.push_str("Suppressed: ");
            self.push_cause(line, suppressed, &nested);
        }

        if let Some(by) = cause.cause() {
            line.push('\n');
            line.push_str(indent);
            line.push_str("Caused by: ");
            self.push_cause(line, by, indent);
        }
    }
}

/// Collapse every path segment but the last to its initial.
///
/// Module paths (`a::b::C`) and dotted names (`a.b.C`) are both accepted.
pub(crate) fn condense(name: &str) -> String {
    let segments: Vec<&str> = if name.contains("::") {
        name.split("::").collect()
    } else {
        name.split('.').collect()
    };
    match segments.split_last() {
        Some((last, init)) if !init.is_empty() => {
            let mut condensed: String = init.iter().filter_map(|s| s.chars().next()).collect();
            condensed.push('.');
            condensed.push_str(last);
            condensed
        }
        _ => name.to_owned(),
    }
}
