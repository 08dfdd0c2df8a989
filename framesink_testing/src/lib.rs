//! Shared helpers for exercising `framesink` sinks in tests.
//!
//! ```rust
//! use framesink::{ByteArrayMessageSink, MessageSink, SessionConfig};
//! use framesink_testing::{OutcomeLog, RecordingHandler, fragment};
//!
//! let handler = RecordingHandler::new();
//! let outcomes = OutcomeLog::new();
//! let mut sink = ByteArrayMessageSink::new(SessionConfig::new(64), handler.clone());
//! for frame in fragment(b"hello world", 4) {
//!     sink.accept(frame, outcomes.completion());
//! }
//! assert_eq!(handler.messages(), vec![b"hello world".to_vec()]);
//! assert!(outcomes.all_ok());
//! ```

pub mod frames;
pub mod logging;
pub mod recorder;

pub use frames::{fragment, frame_sizes};
pub use logging::{LoggerHandle, logger};
pub use recorder::{OutcomeLog, RecordedOutcome, RecordingHandler};
