#![doc(html_root_url = "https://docs.rs/framesink/latest")]
//! Public API for the `framesink` library.
//!
//! This crate assembles fragmented protocol messages: a [`MessageSink`]
//! accepts parsed frames in order, enforces a per-session size limit and
//! delivers every complete message to an application handler exactly once,
//! acknowledging each frame through a [`Completion`].

pub mod completion;
pub mod diagnostics;
pub mod frame;
pub mod handler;
pub mod metrics;
pub mod panic;
pub mod pump;
pub mod session;
pub mod sink;

pub use completion::{Completion, CompletionFuture, Outcome, completion_channel};
pub use frame::{Frame, OpCode};
pub use handler::{HandlerError, MessageHandler};
pub use pump::{FailurePolicy, PumpStats, pump};
pub use session::{MessageSizeLimit, SessionConfig, SessionLimits};
pub use sink::{ByteArrayMessageSink, MessageSink, SinkError};
