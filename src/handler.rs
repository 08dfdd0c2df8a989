//! Application callbacks receiving assembled messages.
//!
//! A [`MessageHandler`] is registered when the sink is built. The calling
//! contract mirrors a classic `(buf, offset, len)` callback: the handler
//! receives the whole message buffer, an offset of zero and the message
//! length. Any `FnMut(&[u8], usize, usize) -> Result<(), HandlerError>`
//! closure qualifies, so signature mismatches are compile errors rather than
//! runtime failures.

use std::error::Error;

/// Error returned by a handler that rejects a message.
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Receives each assembled message exactly once.
///
/// # Examples
///
/// ```
/// use framesink::handler::{HandlerError, MessageHandler};
///
/// struct Collect(Vec<Vec<u8>>);
///
/// impl MessageHandler for Collect {
///     fn on_message(&mut self, bytes: &[u8], offset: usize, len: usize) -> Result<(), HandlerError> {
///         self.0.push(bytes[offset..offset + len].to_vec());
///         Ok(())
///     }
/// }
///
/// let mut handler = Collect(Vec::new());
/// handler.on_message(b"abc", 0, 3).expect("collect never fails");
/// assert_eq!(handler.0, vec![b"abc".to_vec()]);
/// ```
pub trait MessageHandler {
    /// Handle one complete message.
    ///
    /// # Errors
    ///
    /// Implementations return an error to reject the message; the sink
    /// reports it as a failed completion for the final frame.
    fn on_message(&mut self, bytes: &[u8], offset: usize, len: usize) -> Result<(), HandlerError>;
}

impl<F> MessageHandler for F
where
    F: FnMut(&[u8], usize, usize) -> Result<(), HandlerError>,
{
    fn on_message(&mut self, bytes: &[u8], offset: usize, len: usize) -> Result<(), HandlerError> {
        self(bytes, offset, len)
    }
}
