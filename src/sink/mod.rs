//! Message sinks turning frame streams into complete messages.
//!
//! A sink accepts the frames of one logical message in arrival order,
//! accumulates their payloads, and hands the finished message to an
//! application handler. Each accepted frame is acknowledged exactly once
//! through its [`Completion`]:
//!
//! - non-final frames succeed once their payload is buffered;
//! - the final frame succeeds once the handler has accepted the message;
//! - size violations and handler failures are reported as failures, after
//!   which the sink is back to its idle state.
//!
//! Sinks never return errors from [`MessageSink::accept`] directly.

mod accumulator;
mod byte_array;
pub mod error;

pub use accumulator::INITIAL_BUFFER_CAPACITY;
pub use byte_array::ByteArrayMessageSink;
pub use error::SinkError;

use crate::{completion::Completion, frame::Frame};

/// Consumer of the frames belonging to one message at a time.
///
/// Callers must feed frames in arrival order; `&mut self` rules out
/// concurrent calls on the same sink.
pub trait MessageSink {
    /// Accept one frame and report its outcome through `completion`.
    fn accept<C: Completion>(&mut self, frame: Frame, completion: C);
}

#[cfg(test)]
mod tests;
