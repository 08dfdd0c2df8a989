//! Asynchronous driver feeding a frame stream into a sink.
//!
//! [`pump`] plays the upstream role: it pulls frames from a
//! [`Stream`](futures::Stream), hands each one to a [`MessageSink`] with a
//! channel-backed completion, and awaits that completion before accepting the
//! next frame. Outcomes are therefore observed in acceptance order even when
//! the completion is resolved asynchronously.
//!
//! Failures are logged at `warn` level. Whether a failure ends the stream is
//! decided by the [`FailurePolicy`]; the sink itself never makes that call.

use futures::{Stream, StreamExt};
use log::warn;

use crate::{
    completion::completion_channel,
    frame::Frame,
    sink::{MessageSink, SinkError},
};

/// What the pump does after a frame's completion reports failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop and return the failure, as a connection would be closed.
    #[default]
    Abort,
    /// Count the failure and keep feeding frames.
    Continue,
}

/// Counters describing one pump run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Final frames whose completion succeeded.
    pub messages: u64,
    /// Completions that reported failure.
    pub failures: u64,
}

/// Drive `frames` through `sink` until the stream ends.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], returns the first failure reported by the
/// sink. With [`FailurePolicy::Continue`] the function never fails.
///
/// # Examples
///
/// ```
/// use framesink::{
///     frame::Frame,
///     handler::HandlerError,
///     pump::{FailurePolicy, pump},
///     session::SessionConfig,
///     sink::ByteArrayMessageSink,
/// };
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
/// # rt.block_on(async {
/// let handler = |_: &[u8], _: usize, _: usize| -> Result<(), HandlerError> { Ok(()) };
/// let mut sink = ByteArrayMessageSink::new(SessionConfig::default(), handler);
/// let frames = futures::stream::iter(vec![
///     Frame::binary("ab"),
///     Frame::continuation("cd").with_fin(true),
/// ]);
///
/// let stats = pump(&mut sink, frames, FailurePolicy::Abort)
///     .await
///     .expect("frames assemble");
/// assert_eq!((stats.frames, stats.messages), (2, 1));
/// # });
/// ```
pub async fn pump<K, St>(
    sink: &mut K,
    frames: St,
    policy: FailurePolicy,
) -> Result<PumpStats, SinkError>
where
    K: MessageSink,
    St: Stream<Item = Frame>,
{
    let mut frames = std::pin::pin!(frames);
    let mut stats = PumpStats::default();

    while let Some(frame) = frames.next().await {
        let fin = frame.is_fin();
        let opcode = frame.opcode();
        let (completion, outcome) = completion_channel();
        sink.accept(frame, completion);
        stats.frames += 1;

        match outcome.await {
            Ok(()) if fin => stats.messages += 1,
            Ok(()) => {}
            Err(err) => {
                stats.failures += 1;
                warn!(
                    "frame rejected: index={}, opcode={opcode}, fin={fin}, error={err}",
                    stats.frames
                );
                if policy == FailurePolicy::Abort {
                    return Err(err);
                }
            }
        }
    }

    tracing::debug!(
        frames = stats.frames,
        messages = stats.messages,
        failures = stats.failures,
        "frame stream exhausted"
    );
    Ok(stats)
}
