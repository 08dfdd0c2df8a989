//! Parsed protocol frames handed to a message sink.
//!
//! A [`Frame`] is one fragment of a logical message: an optional payload and
//! a `fin` marker flagging the last fragment. Decoding frames off the wire is
//! the transport's job; the sink only sees values of this type.

use std::fmt;

use bytes::Bytes;

/// Frame kind as announced by the transport.
///
/// Sinks do not interpret the opcode; it travels with the frame so that
/// diagnostics can report what kind of message was being assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// First fragment of a binary message.
    #[default]
    Binary,
    /// First fragment of a text message.
    Text,
    /// Any fragment after the first.
    Continuation,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "BINARY",
            Self::Text => "TEXT",
            Self::Continuation => "CONTINUATION",
        };
        f.write_str(name)
    }
}

/// One fragment of a logical message.
///
/// # Examples
///
/// ```
/// use framesink::frame::{Frame, OpCode};
///
/// let frame = Frame::binary("abc").with_fin(true);
/// assert!(frame.has_payload());
/// assert!(frame.is_fin());
/// assert_eq!(frame.opcode(), OpCode::Binary);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    opcode: OpCode,
    payload: Option<Bytes>,
    fin: bool,
}

impl Frame {
    /// Create a frame from its parts.
    #[must_use]
    pub fn new(opcode: OpCode, payload: Option<Bytes>, fin: bool) -> Self {
        Self {
            opcode,
            payload,
            fin,
        }
    }

    /// Create a non-final binary frame carrying `payload`.
    #[must_use]
    pub fn binary(payload: impl Into<Bytes>) -> Self {
        Self::new(OpCode::Binary, Some(payload.into()), false)
    }

    /// Create a non-final continuation frame carrying `payload`.
    #[must_use]
    pub fn continuation(payload: impl Into<Bytes>) -> Self {
        Self::new(OpCode::Continuation, Some(payload.into()), false)
    }

    /// Create a final frame without any payload.
    #[must_use]
    pub fn empty_fin(opcode: OpCode) -> Self { Self::new(opcode, None, true) }

    /// Set the `fin` marker.
    #[must_use]
    pub fn with_fin(mut self, fin: bool) -> Self {
        self.fin = fin;
        self
    }

    /// Frame kind.
    #[must_use]
    pub const fn opcode(&self) -> OpCode { self.opcode }

    /// Whether this is the last frame of its message.
    #[must_use]
    pub const fn is_fin(&self) -> bool { self.fin }

    /// True when the frame carries at least one payload byte.
    #[must_use]
    pub fn has_payload(&self) -> bool { self.payload.as_ref().is_some_and(|p| !p.is_empty()) }

    /// Borrow the payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Bytes> { self.payload.as_ref() }

    /// Number of payload bytes; zero when absent.
    #[must_use]
    pub fn payload_len(&self) -> usize { self.payload.as_ref().map_or(0, Bytes::len) }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Frame, OpCode};

    #[rstest]
    #[case(Frame::binary("abc"), true)]
    #[case(Frame::binary(""), false)]
    #[case(Frame::empty_fin(OpCode::Binary), false)]
    fn has_payload_ignores_empty_payloads(#[case] frame: Frame, #[case] expected: bool) {
        assert_eq!(frame.has_payload(), expected);
    }

    #[test]
    fn with_fin_keeps_payload() {
        let frame = Frame::continuation("xy").with_fin(true);
        assert!(frame.is_fin());
        assert_eq!(frame.payload_len(), 2);
        assert_eq!(frame.opcode(), OpCode::Continuation);
    }
}
