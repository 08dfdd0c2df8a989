//! Rendering of panic payloads raised by application handlers.

use std::{any::Any, fmt};

/// Display wrapper over a caught panic payload.
///
/// `String` and `&'static str` payloads render verbatim; anything else falls
/// back to its `Debug` form.
///
/// ```
/// use framesink::panic::PanicMessage;
///
/// let caught = std::panic::catch_unwind(|| panic!("bad frame")).expect_err("panicked");
/// assert_eq!(PanicMessage::new(caught).to_string(), "bad frame");
/// ```
#[derive(Debug)]
#[must_use]
pub struct PanicMessage(Box<dyn Any + Send>);

impl PanicMessage {
    /// Wrap a payload obtained from [`std::panic::catch_unwind`].
    pub fn new(payload: Box<dyn Any + Send>) -> Self { Self(payload) }
}

impl fmt::Display for PanicMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            self.0.downcast_ref::<String>(),
            self.0.downcast_ref::<&'static str>(),
        ) {
            (Some(message), _) => f.write_str(message),
            (None, Some(message)) => f.write_str(message),
            (None, None) => write!(f, "{:?}", self.0),
        }
    }
}
