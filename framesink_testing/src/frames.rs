//! Builders for frame sequences.

use bytes::Bytes;
use framesink::{Frame, OpCode};

/// Split `payload` into frames of at most `chunk` bytes.
///
/// The first frame is binary, the rest are continuations and the last one
/// carries the fin flag. An empty payload yields a single empty final frame.
///
/// # Panics
///
/// Panics if `chunk` is zero.
#[must_use]
pub fn fragment(payload: &[u8], chunk: usize) -> Vec<Frame> {
    assert!(chunk > 0, "chunk size must be non-zero");
    if payload.is_empty() {
        return vec![Frame::empty_fin(OpCode::Binary)];
    }
    let count = payload.len().div_ceil(chunk);
    payload
        .chunks(chunk)
        .enumerate()
        .map(|(i, part)| {
            let opcode = if i == 0 { OpCode::Binary } else { OpCode::Continuation };
            Frame::new(opcode, Some(Bytes::copy_from_slice(part)), i + 1 == count)
        })
        .collect()
}

/// Payload lengths of `frames`, handy in assertion messages.
#[must_use]
pub fn frame_sizes(frames: &[Frame]) -> Vec<usize> { frames.iter().map(Frame::payload_len).collect() }
