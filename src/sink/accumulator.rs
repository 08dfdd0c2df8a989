//! Per-message byte accumulation with scoped reset.

use std::num::NonZeroUsize;

use bytes::{Bytes, BytesMut};

use super::SinkError;
use crate::session::MessageSizeLimit;

/// Upper bound on the capacity reserved when a message starts.
pub const INITIAL_BUFFER_CAPACITY: usize = 65_535;

/// Bytes collected so far for the in-progress message.
///
/// The buffer is allocated lazily by the first payload-bearing frame and
/// dropped again when the message completes or fails.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    buffer: Option<BytesMut>,
    size: usize,
}

impl Accumulator {
    /// Count `payload` against `limit` and append it.
    ///
    /// Bytes that would break the limit are never copied into the buffer.
    pub(crate) fn append(&mut self, payload: &[u8], limit: MessageSizeLimit) -> Result<(), SinkError> {
        self.size = self.size.saturating_add(payload.len());
        if let Some(cap) = limit.get().filter(|_| limit.is_exceeded_by(self.size)) {
            return Err(SinkError::MessageTooLarge {
                actual: self.size,
                limit: cap,
            });
        }

        self.buffer
            .get_or_insert_with(|| BytesMut::with_capacity(initial_capacity(limit, payload.len())))
            .extend_from_slice(payload);
        Ok(())
    }

    /// Freeze the collected bytes, yielding an empty buffer when nothing arrived.
    pub(crate) fn take(&mut self) -> Bytes { self.buffer.take().map_or_else(Bytes::new, BytesMut::freeze) }

    pub(crate) fn reset(&mut self) {
        self.buffer = None;
        self.size = 0;
    }

    pub(crate) fn len(&self) -> usize { self.size }

    pub(crate) fn is_active(&self) -> bool { self.buffer.is_some() || self.size > 0 }
}

fn initial_capacity(limit: MessageSizeLimit, first: usize) -> usize {
    let ceiling = limit.get().map_or(INITIAL_BUFFER_CAPACITY, NonZeroUsize::get);
    INITIAL_BUFFER_CAPACITY.min(ceiling).max(first)
}

/// Resets the accumulator when dropped unless disarmed.
///
/// Every exit from frame processing passes through this guard, so a failed or
/// delivered message can never leak bytes into the next one.
pub(crate) struct ResetGuard<'a> {
    accumulator: &'a mut Accumulator,
    armed: bool,
}

impl<'a> ResetGuard<'a> {
    pub(crate) fn new(accumulator: &'a mut Accumulator) -> Self {
        Self {
            accumulator,
            armed: true,
        }
    }

    /// Keep the accumulated state past this guard's lifetime.
    pub(crate) fn disarm(mut self) { self.armed = false; }
}

impl std::ops::Deref for ResetGuard<'_> {
    type Target = Accumulator;

    fn deref(&self) -> &Self::Target { self.accumulator }
}

impl std::ops::DerefMut for ResetGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.accumulator }
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.accumulator.reset();
        }
    }
}
