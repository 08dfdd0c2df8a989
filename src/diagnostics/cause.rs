//! Owned snapshots of error chains for rendering.

use std::error::Error;

/// Error description attached to a diagnostic record.
///
/// A cause may carry frame lines (for example from a captured backtrace),
/// suppressed causes and a nested cause. [`Cause::from_error`] walks
/// [`Error::source`] so any standard error chain renders as nested
/// `Caused by:` blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cause {
    summary: String,
    frames: Vec<String>,
    suppressed: Vec<Cause>,
    cause: Option<Box<Cause>>,
}

impl Cause {
    /// Create a cause with the given one-line summary.
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Snapshot `error` and its whole source chain.
    ///
    /// ```
    /// use framesink::{diagnostics::Cause, sink::SinkError};
    ///
    /// let err = SinkError::Handler("disk full".into());
    /// let cause = Cause::from_error(&err);
    /// assert_eq!(cause.summary(), "message handler failed: disk full");
    /// assert_eq!(cause.cause().map(Cause::summary), Some("disk full"));
    /// ```
    #[must_use]
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut snapshot = Self::new(error.to_string());
        if let Some(source) = error.source() {
            snapshot.cause = Some(Box::new(Self::from_error(source)));
        }
        snapshot
    }

    /// Attach frame lines rendered beneath the summary.
    #[must_use]
    pub fn with_frames<I, T>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.frames.extend(frames.into_iter().map(Into::into));
        self
    }

    /// Attach a suppressed cause.
    #[must_use]
    pub fn with_suppressed(mut self, suppressed: Cause) -> Self {
        self.suppressed.push(suppressed);
        self
    }

    /// Replace the nested cause.
    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    #[must_use]
    pub fn summary(&self) -> &str { &self.summary }

    #[must_use]
    pub fn frames(&self) -> &[String] { &self.frames }

    #[must_use]
    pub fn suppressed(&self) -> &[Cause] { &self.suppressed }

    #[must_use]
    pub fn cause(&self) -> Option<&Cause> { self.cause.as_deref() }
}
