//! Message assembly scenarios exercised through the public API.

use framesink::{ByteArrayMessageSink, Frame, MessageSink, OpCode, SessionConfig};
use framesink_testing::{OutcomeLog, RecordedOutcome, RecordingHandler};
use rstest::{fixture, rstest};

struct Scenario {
    handler: RecordingHandler,
    outcomes: OutcomeLog,
    sink: ByteArrayMessageSink<SessionConfig, RecordingHandler>,
}

impl Scenario {
    fn new(limit: i64, handler: RecordingHandler) -> Self {
        Self {
            sink: ByteArrayMessageSink::new(SessionConfig::new(limit), handler.clone()),
            handler,
            outcomes: OutcomeLog::new(),
        }
    }

    fn feed(&mut self, frames: impl IntoIterator<Item = Frame>) {
        for frame in frames {
            self.sink.accept(frame, self.outcomes.completion());
        }
    }
}

#[fixture]
fn limit_ten() -> Scenario { Scenario::new(10, RecordingHandler::new()) }

#[rstest]
fn twelve_bytes_over_a_ten_byte_limit(#[from(limit_ten)] mut s: Scenario) {
    s.feed([
        Frame::binary(vec![1_u8; 4]),
        Frame::continuation(vec![2_u8; 4]),
        Frame::continuation(vec![3_u8; 4]).with_fin(true),
    ]);

    let outcomes = s.outcomes.outcomes();
    assert_eq!(outcomes[..2], [RecordedOutcome::Succeeded, RecordedOutcome::Succeeded]);
    assert!(matches!(
        &outcomes[2],
        RecordedOutcome::Failed { kind: "message_too_large", message }
            if message.contains("(actual) 12 > (configured max binary buffer size) 10")
    ));
    assert!(s.handler.messages().is_empty());
}

#[test]
fn empty_then_final_payload() {
    let mut s = Scenario::new(100, RecordingHandler::new());
    s.feed([
        Frame::new(OpCode::Binary, None, false),
        Frame::continuation("abc").with_fin(true),
    ]);

    assert!(s.outcomes.all_ok());
    assert_eq!(s.outcomes.len(), 2);
    assert_eq!(s.handler.messages(), vec![b"abc".to_vec()]);
}

#[test]
fn handler_failure_is_reported_on_final_frame() {
    let mut s = Scenario::new(100, RecordingHandler::rejecting("bad message"));
    s.feed([Frame::binary("ab"), Frame::continuation("c").with_fin(true)]);

    assert_eq!(
        s.outcomes.outcomes(),
        vec![
            RecordedOutcome::Succeeded,
            RecordedOutcome::Failed {
                kind: "handler",
                message: "message handler failed: bad message".to_owned(),
            },
        ]
    );
    assert!(!s.sink.is_accumulating());
}

#[rstest]
fn next_message_unaffected_by_discarded_one(#[from(limit_ten)] mut s: Scenario) {
    s.feed([Frame::binary(vec![0_u8; 11])]);
    s.feed([Frame::binary("fresh").with_fin(true)]);

    assert_eq!(s.outcomes.len(), 2);
    assert_eq!(s.handler.messages(), vec![b"fresh".to_vec()]);
}

#[test]
fn thousands_of_single_byte_frames() {
    let mut s = Scenario::new(0, RecordingHandler::new());
    let payload: Vec<u8> = (0..5_000_u32).map(|i| (i % 251) as u8).collect();
    let last = payload.len() - 1;
    s.feed(
        payload
            .iter()
            .enumerate()
            .map(|(i, byte)| Frame::continuation(vec![*byte]).with_fin(i == last)),
    );

    assert_eq!(s.outcomes.len(), payload.len());
    assert!(s.outcomes.all_ok());
    assert_eq!(s.handler.messages(), vec![payload]);
}
