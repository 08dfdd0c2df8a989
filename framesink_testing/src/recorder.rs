//! Recording doubles for handlers and completions.

use std::sync::{Arc, Mutex, MutexGuard};

use framesink::{Completion, HandlerError, MessageHandler, Outcome};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> { mutex.lock().expect("recorder lock poisoned") }

#[derive(Debug, Default)]
struct HandlerState {
    messages: Vec<Vec<u8>>,
    reject_with: Option<String>,
}

/// Handler storing every delivered message.
///
/// Clones share their recordings, so a clone can be handed to a sink while the
/// test keeps another for assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingHandler {
    state: Arc<Mutex<HandlerState>>,
}

impl RecordingHandler {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A handler that records each message and then rejects it with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let handler = Self::new();
        lock(&handler.state).reject_with = Some(reason.into());
        handler
    }

    /// Messages delivered so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<Vec<u8>> { lock(&self.state).messages.clone() }
}

impl MessageHandler for RecordingHandler {
    fn on_message(&mut self, bytes: &[u8], offset: usize, len: usize) -> Result<(), HandlerError> {
        let mut state = lock(&self.state);
        state.messages.push(bytes[offset..offset + len].to_vec());
        match &state.reject_with {
            Some(reason) => Err(reason.clone().into()),
            None => Ok(()),
        }
    }
}

/// Simplified view of one reported outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedOutcome {
    Succeeded,
    /// Failure with the error's kind label and rendered message.
    Failed { kind: &'static str, message: String },
}

/// Collects outcomes from the completions it hands out.
#[derive(Clone, Debug, Default)]
pub struct OutcomeLog {
    outcomes: Arc<Mutex<Vec<RecordedOutcome>>>,
}

impl OutcomeLog {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A completion appending its outcome to this log.
    pub fn completion(&self) -> impl Completion + Send + 'static {
        let outcomes = Arc::clone(&self.outcomes);
        move |outcome: Outcome| {
            let recorded = match outcome {
                Ok(()) => RecordedOutcome::Succeeded,
                Err(err) => RecordedOutcome::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            lock(&outcomes).push(recorded);
        }
    }

    /// Outcomes recorded so far, in reporting order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<RecordedOutcome> { lock(&self.outcomes).clone() }

    #[must_use]
    pub fn len(&self) -> usize { lock(&self.outcomes).len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// True when every recorded outcome succeeded.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        lock(&self.outcomes)
            .iter()
            .all(|outcome| *outcome == RecordedOutcome::Succeeded)
    }
}
