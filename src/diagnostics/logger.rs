//! `log` backend rendering records through an [`Appender`].

use std::io::Write;

use chrono::Utc;
use log::{LevelFilter, Log, Metadata, SetLoggerError};

use super::{Appender, Level, Record};

/// Thread label used when the current thread has no name.
const UNNAMED_THREAD: &str = "unnamed";

/// Routes `log` records (and `tracing` events forwarded through `log`) into an
/// [`Appender`].
///
/// The record target becomes the logger name and the current thread's name
/// the thread field. `log` hands over preformatted messages, which both format
/// modes pass through unchanged.
#[derive(Debug)]
pub struct DiagnosticsLogger<W> {
    appender: Appender<W>,
    max_level: LevelFilter,
}

impl<W: Write + Send + 'static> DiagnosticsLogger<W> {
    #[must_use]
    pub fn new(appender: Appender<W>, max_level: LevelFilter) -> Self { Self { appender, max_level } }

    /// Install as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Fails when another logger has already been installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Borrow the wrapped appender.
    #[must_use]
    pub fn appender(&self) -> &Appender<W> { &self.appender }
}

impl<W: Write + Send + 'static> Log for DiagnosticsLogger<W> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool { metadata.level() <= self.max_level }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let thread = std::thread::current();
        let rendered = Record::new(
            Utc::now(),
            Level::from(record.level()),
            record.target(),
            thread.name().unwrap_or(UNNAMED_THREAD),
        )
        .with_template(&message);
        // A logger has nowhere to report its own write failures.
        let _ = self.appender.emit(&rendered);
    }

    fn flush(&self) { let _ = self.appender.flush(); }
}
