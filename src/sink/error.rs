//! Failures reported through a sink's completion signal.

use std::{fmt, num::NonZeroUsize};

use thiserror::Error;

use crate::handler::HandlerError;

/// Errors surfaced by message sinks.
///
/// None of these are returned from [`accept`](super::MessageSink::accept);
/// they reach the caller exclusively through the frame's completion.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The accumulated message exceeded the configured limit.
    #[error(
        "binary message too large: (actual) {} > (configured max binary buffer size) {}",
        grouped(.actual),
        grouped(.limit)
    )]
    MessageTooLarge {
        /// Bytes accumulated when the guard tripped.
        actual: usize,
        /// Configured cap.
        limit: NonZeroUsize,
    },

    /// The application handler rejected the message.
    #[error("message handler failed: {0}")]
    Handler(#[source] HandlerError),

    /// The application handler panicked while processing the message.
    #[error("message handler panicked: {0}")]
    HandlerPanicked(String),

    /// An asynchronous completion was dropped before reporting an outcome.
    #[error("completion dropped without reporting an outcome")]
    CompletionDropped,
}

impl SinkError {
    /// Short, stable label used for metrics and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageTooLarge { .. } => "message_too_large",
            Self::Handler(_) => "handler",
            Self::HandlerPanicked(_) => "handler_panic",
            Self::CompletionDropped => "completion_dropped",
        }
    }
}

/// Renders an integer with comma-separated thousands.
struct Grouped(usize);

fn grouped<T: Copy + Into<usize>>(value: &T) -> Grouped { Grouped((*value).into()) }

impl fmt::Display for Grouped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && i % 3 == lead {
                f.write_str(",")?;
            }
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
