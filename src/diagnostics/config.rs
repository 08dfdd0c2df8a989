//! Settings controlling how diagnostic records are rendered.

use chrono::{FixedOffset, Offset, Utc};

use super::FormatMode;

/// Rendering options for an [`Appender`](super::Appender).
///
/// The time zone is part of the configuration rather than read from the
/// process environment, so two appenders in one process can render
/// timestamps differently.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticsConfig {
    /// Replace control characters in free-text fields.
    pub escape_messages: bool,
    /// Placeholder substitution strategy.
    pub format_mode: FormatMode,
    /// Collapse logger path segments to their initials.
    pub condensed_names: bool,
    /// Render causes inline as a single summary instead of nested blocks.
    pub hide_stacks: bool,
    /// Offset applied to record timestamps.
    pub offset: FixedOffset,
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn with_escape_messages(mut self, escape: bool) -> Self {
        self.escape_messages = escape;
        self
    }

    #[must_use]
    pub fn with_format_mode(mut self, mode: FormatMode) -> Self {
        self.format_mode = mode;
        self
    }

    #[must_use]
    pub fn with_condensed_names(mut self, condensed: bool) -> Self {
        self.condensed_names = condensed;
        self
    }

    #[must_use]
    pub fn with_hide_stacks(mut self, hide: bool) -> Self {
        self.hide_stacks = hide;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the offset from a whole number of seconds east of UTC.
    ///
    /// Returns `None` when the offset is out of range (a day or more).
    #[must_use]
    pub fn with_offset_seconds(self, seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(|offset| self.with_offset(offset))
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            escape_messages: true,
            format_mode: FormatMode::Strict,
            condensed_names: true,
            hide_stacks: false,
            offset: Utc.fix(),
        }
    }
}
