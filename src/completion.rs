//! Exactly-once completion signals for accepted frames.
//!
//! Every call to [`MessageSink::accept`](crate::sink::MessageSink::accept)
//! hands over a [`Completion`]. The sink reports the frame's outcome through it
//! exactly once; consuming `self` makes a second report impossible.
//!
//! Completions may be synchronous closures or asynchronous channels. Use
//! [`completion_channel`] when the caller wants to await the outcome instead of
//! observing it inline.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;

use crate::sink::SinkError;

/// Outcome reported for one frame.
pub type Outcome = Result<(), SinkError>;

/// Receiver of a frame's outcome.
pub trait Completion {
    /// Report the outcome.
    fn complete(self, outcome: Outcome);

    /// Report success.
    fn succeeded(self)
    where
        Self: Sized,
    {
        self.complete(Ok(()));
    }

    /// Report failure with `cause`.
    fn failed(self, cause: SinkError)
    where
        Self: Sized,
    {
        self.complete(Err(cause));
    }
}

impl<F> Completion for F
where
    F: FnOnce(Outcome),
{
    fn complete(self, outcome: Outcome) { self(outcome) }
}

/// Create a completion whose outcome is observed through a future.
///
/// # Examples
///
/// ```
/// use framesink::completion::{Completion, completion_channel};
///
/// let rt = tokio::runtime::Builder::new_current_thread()
///     .build()
///     .expect("runtime");
/// let (completion, outcome) = completion_channel();
/// completion.succeeded();
/// assert!(rt.block_on(outcome).is_ok());
/// ```
#[must_use]
pub fn completion_channel() -> (ChannelCompletion, CompletionFuture) {
    let (tx, rx) = oneshot::channel();
    (ChannelCompletion { tx }, CompletionFuture { rx })
}

/// Sending half returned by [`completion_channel`].
#[derive(Debug)]
pub struct ChannelCompletion {
    tx: oneshot::Sender<Outcome>,
}

impl Completion for ChannelCompletion {
    fn complete(self, outcome: Outcome) {
        // The waiting side may have gone away; the outcome is then moot.
        let _ = self.tx.send(outcome);
    }
}

/// Future resolving to the outcome reported through a [`ChannelCompletion`].
///
/// Resolves to [`SinkError::CompletionDropped`] when the completion is
/// dropped without reporting.
#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct CompletionFuture {
    rx: oneshot::Receiver<Outcome>,
}

impl Future for CompletionFuture {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SinkError::CompletionDropped)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{Completion, Outcome, completion_channel};
    use crate::sink::SinkError;

    #[test]
    fn closure_completion_receives_outcome() {
        let seen: Arc<Mutex<Vec<bool>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let completion = move |outcome: Outcome| {
            sink.lock().expect("lock").push(outcome.is_ok());
        };
        completion.failed(SinkError::CompletionDropped);
        assert_eq!(*seen.lock().expect("lock"), vec![false]);
    }

    #[tokio::test]
    async fn channel_completion_delivers_failure() {
        let (completion, outcome) = completion_channel();
        completion.failed(SinkError::HandlerPanicked("boom".into()));
        let err = outcome.await.expect_err("failure expected");
        assert!(matches!(err, SinkError::HandlerPanicked(msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn dropped_completion_resolves_to_error() {
        let (completion, outcome) = completion_channel();
        drop(completion);
        assert!(matches!(outcome.await, Err(SinkError::CompletionDropped)));
    }
}
