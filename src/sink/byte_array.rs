//! Sink assembling binary messages into one contiguous buffer.

use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
};

use bytes::Bytes;
use log::debug;

use super::{
    MessageSink,
    SinkError,
    accumulator::{Accumulator, ResetGuard},
};
use crate::{
    completion::{Completion, Outcome},
    frame::Frame,
    handler::MessageHandler,
    panic::PanicMessage,
    session::{MessageSizeLimit, SessionLimits},
};

/// Collects frame payloads and delivers each complete message as one byte
/// buffer.
///
/// The sink is either idle or accumulating. Payload-bearing frames move it to
/// accumulating; a final frame delivers the message and returns it to idle, as
/// does any failure. The size limit is read from the session on every frame.
///
/// # Examples
///
/// ```
/// use framesink::{
///     completion::Outcome,
///     frame::Frame,
///     handler::HandlerError,
///     session::SessionConfig,
///     sink::{ByteArrayMessageSink, MessageSink},
/// };
///
/// let mut received = Vec::new();
/// let handler = |bytes: &[u8], offset: usize, len: usize| -> Result<(), HandlerError> {
///     received.push(bytes[offset..offset + len].to_vec());
///     Ok(())
/// };
/// let mut sink = ByteArrayMessageSink::new(SessionConfig::new(100), handler);
///
/// sink.accept(Frame::binary("ab"), |outcome: Outcome| assert!(outcome.is_ok()));
/// sink.accept(Frame::continuation("c").with_fin(true), |outcome: Outcome| {
///     assert!(outcome.is_ok());
/// });
/// drop(sink);
/// assert_eq!(received, vec![b"abc".to_vec()]);
/// ```
pub struct ByteArrayMessageSink<S, H> {
    session: S,
    handler: H,
    accumulator: Accumulator,
}

impl<S, H> ByteArrayMessageSink<S, H>
where
    S: SessionLimits,
    H: MessageHandler,
{
    /// Create a sink reading limits from `session` and delivering to `handler`.
    #[must_use]
    pub fn new(session: S, handler: H) -> Self {
        Self {
            session,
            handler,
            accumulator: Accumulator::default(),
        }
    }

    /// Whether part of a message is currently buffered.
    #[must_use]
    pub fn is_accumulating(&self) -> bool { self.accumulator.is_active() }

    /// Bytes counted for the in-progress message.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.accumulator.len() }

    fn process(&mut self, frame: &Frame) -> Outcome {
        let limit = MessageSizeLimit::from_raw(self.session.max_binary_message_size());
        let mut guard = ResetGuard::new(&mut self.accumulator);

        if frame.has_payload() {
            let payload: &[u8] = frame.payload().map_or(&[][..], |p| &p[..]);
            guard.append(payload, limit)?;
        }

        if !frame.is_fin() {
            guard.disarm();
            return Ok(());
        }

        let message = guard.take();
        deliver(&mut self.handler, &message)
    }
}

fn deliver<H: MessageHandler>(handler: &mut H, message: &Bytes) -> Outcome {
    let len = message.len();
    match catch_unwind(AssertUnwindSafe(|| handler.on_message(message, 0, len))) {
        Ok(Ok(())) => {
            crate::metrics::inc_messages();
            Ok(())
        }
        Ok(Err(err)) => Err(SinkError::Handler(err)),
        Err(payload) => Err(SinkError::HandlerPanicked(
            PanicMessage::new(payload).to_string(),
        )),
    }
}

impl<S, H> MessageSink for ByteArrayMessageSink<S, H>
where
    S: SessionLimits,
    H: MessageHandler,
{
    fn accept<C: Completion>(&mut self, frame: Frame, completion: C) {
        crate::metrics::inc_frames();
        let outcome = self.process(&frame);
        if let Err(err) = &outcome {
            crate::metrics::inc_errors(err.kind());
            debug!(
                "message discarded: opcode={}, fin={}, error={err}",
                frame.opcode(),
                frame.is_fin()
            );
        }
        completion.complete(outcome);
    }
}

impl<S: fmt::Debug, H> fmt::Debug for ByteArrayMessageSink<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArrayMessageSink")
            .field("session", &self.session)
            .field("accumulator", &self.accumulator)
            .finish_non_exhaustive()
    }
}
