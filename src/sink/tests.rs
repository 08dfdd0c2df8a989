//! Unit tests for `ByteArrayMessageSink` state transitions and limits.

use std::{
    cell::RefCell,
    rc::Rc,
    sync::Arc,
};

use rstest::{fixture, rstest};

use super::{ByteArrayMessageSink, MessageSink, SinkError};
use crate::{
    completion::Outcome,
    frame::{Frame, OpCode},
    handler::HandlerError,
    session::SessionConfig,
};

type Delivered = Rc<RefCell<Vec<Vec<u8>>>>;
type Handler = Box<dyn FnMut(&[u8], usize, usize) -> Result<(), HandlerError>>;
type TestSink = ByteArrayMessageSink<Arc<SessionConfig>, Handler>;

struct Harness {
    session: Arc<SessionConfig>,
    delivered: Delivered,
    sink: TestSink,
}

impl Harness {
    fn with_handler(limit: i64, mut inner: impl FnMut(&[u8]) -> Result<(), HandlerError> + 'static) -> Self {
        let session = Arc::new(SessionConfig::new(limit));
        let delivered: Delivered = Rc::default();
        let log = Rc::clone(&delivered);
        let handler: Handler = Box::new(move |bytes: &[u8], offset: usize, len: usize| {
            let message = &bytes[offset..offset + len];
            log.borrow_mut().push(message.to_vec());
            inner(message)
        });
        Self {
            sink: ByteArrayMessageSink::new(Arc::clone(&session), handler),
            session,
            delivered,
        }
    }

    fn new(limit: i64) -> Self { Self::with_handler(limit, |_| Ok(())) }

    /// Accept `frame`, returning the outcome and asserting it was reported once.
    fn send(&mut self, frame: Frame) -> Outcome {
        let reports: Rc<RefCell<Vec<Outcome>>> = Rc::default();
        let sink = Rc::clone(&reports);
        self.sink
            .accept(frame, move |outcome: Outcome| sink.borrow_mut().push(outcome));
        let mut reports = reports.borrow_mut();
        assert_eq!(reports.len(), 1, "completion must be reported exactly once");
        reports.pop().expect("one outcome")
    }

    fn delivered(&self) -> Vec<Vec<u8>> { self.delivered.borrow().clone() }
}

#[fixture]
fn harness() -> Harness { Harness::new(100) }

#[rstest]
fn concatenates_payloads_in_arrival_order(#[from(harness)] mut h: Harness) {
    assert!(h.send(Frame::binary("he")).is_ok());
    assert!(h.send(Frame::continuation("ll")).is_ok());
    assert!(h.send(Frame::continuation("o").with_fin(true)).is_ok());

    assert_eq!(h.delivered(), vec![b"hello".to_vec()]);
    assert!(!h.sink.is_accumulating());
}

#[rstest]
fn non_final_frames_do_not_deliver(#[from(harness)] mut h: Harness) {
    assert!(h.send(Frame::binary("abc")).is_ok());
    assert!(h.delivered().is_empty());
    assert!(h.sink.is_accumulating());
    assert_eq!(h.sink.buffered_len(), 3);
}

#[rstest]
fn bare_final_frame_delivers_empty_message(#[from(harness)] mut h: Harness) {
    assert!(h.send(Frame::empty_fin(OpCode::Binary)).is_ok());
    assert_eq!(h.delivered(), vec![Vec::<u8>::new()]);
}

#[rstest]
fn empty_first_frame_then_final_payload(#[from(harness)] mut h: Harness) {
    assert!(h.send(Frame::binary("")).is_ok());
    assert!(!h.sink.is_accumulating());
    assert!(h.send(Frame::continuation("abc").with_fin(true)).is_ok());
    assert_eq!(h.delivered(), vec![b"abc".to_vec()]);
}

#[rstest]
fn empty_payload_mid_message_is_ignored(#[from(harness)] mut h: Harness) {
    assert!(h.send(Frame::binary("ab")).is_ok());
    assert!(h.send(Frame::continuation("")).is_ok());
    assert!(h.send(Frame::new(OpCode::Continuation, None, false)).is_ok());
    assert_eq!(h.sink.buffered_len(), 2);
    assert!(h.send(Frame::continuation("c").with_fin(true)).is_ok());
    assert_eq!(h.delivered(), vec![b"abc".to_vec()]);
}

#[test]
fn exceeding_limit_on_final_frame_skips_handler() {
    let mut h = Harness::new(10);
    assert!(h.send(Frame::binary([0_u8; 4].to_vec())).is_ok());
    assert!(h.send(Frame::continuation([0_u8; 4].to_vec())).is_ok());
    let err = h
        .send(Frame::continuation([0_u8; 4].to_vec()).with_fin(true))
        .expect_err("12 bytes exceed a 10 byte limit");

    assert!(matches!(
        err,
        SinkError::MessageTooLarge { actual: 12, limit } if limit.get() == 10
    ));
    assert!(h.delivered().is_empty());
    assert!(!h.sink.is_accumulating());
}

#[test]
fn exceeding_limit_on_non_final_frame_resets_state() {
    let mut h = Harness::new(4);
    let err = h
        .send(Frame::binary("too long"))
        .expect_err("8 bytes exceed a 4 byte limit");
    assert!(matches!(err, SinkError::MessageTooLarge { actual: 8, .. }));
    assert!(!h.sink.is_accumulating());

    assert!(h.send(Frame::binary("ok").with_fin(true)).is_ok());
    assert_eq!(h.delivered(), vec![b"ok".to_vec()]);
}

#[test]
fn message_at_exact_limit_is_delivered() {
    let mut h = Harness::new(6);
    assert!(h.send(Frame::binary("abc")).is_ok());
    assert!(h.send(Frame::continuation("def").with_fin(true)).is_ok());
    assert_eq!(h.delivered(), vec![b"abcdef".to_vec()]);
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(i64::MIN)]
fn non_positive_limit_never_fails(#[case] limit: i64) {
    let mut h = Harness::new(limit);
    let chunk = vec![7_u8; 64 * 1024];
    for _ in 0..4 {
        assert!(h.send(Frame::continuation(chunk.clone())).is_ok());
    }
    assert!(h.send(Frame::empty_fin(OpCode::Continuation)).is_ok());
    assert_eq!(h.delivered()[0].len(), 4 * chunk.len());
}

#[test]
fn handler_error_fails_final_completion_and_resets() {
    let mut h = Harness::with_handler(100, |_| Err("rejected".into()));
    assert!(h.send(Frame::binary("abc")).is_ok());
    let err = h
        .send(Frame::continuation("d").with_fin(true))
        .expect_err("handler rejects");

    match err {
        SinkError::Handler(cause) => assert_eq!(cause.to_string(), "rejected"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(h.delivered(), vec![b"abcd".to_vec()]);
    assert!(!h.sink.is_accumulating());
}

#[test]
fn handler_panic_fails_final_completion_and_resets() {
    let mut h = Harness::with_handler(100, |bytes| {
        assert!(bytes.is_empty(), "boom");
        Ok(())
    });
    assert!(h.send(Frame::binary("x")).is_ok());
    let err = h
        .send(Frame::empty_fin(OpCode::Continuation))
        .expect_err("handler panics");

    assert!(matches!(err, SinkError::HandlerPanicked(ref msg) if msg.contains("boom")));
    assert!(!h.sink.is_accumulating());

    assert!(h.send(Frame::empty_fin(OpCode::Binary)).is_ok());
}

#[test]
fn limit_changes_apply_to_next_frame() {
    let mut h = Harness::new(2);
    assert!(h.send(Frame::binary("abc").with_fin(true)).is_err());

    h.session.set_max_binary_message_size(3);
    assert!(h.send(Frame::binary("abc").with_fin(true)).is_ok());
    assert_eq!(h.delivered(), vec![b"abc".to_vec()]);
}

#[test]
fn state_after_failure_matches_fresh_sink() {
    let frames = || {
        vec![
            Frame::binary("12"),
            Frame::continuation("34"),
            Frame::continuation("5").with_fin(true),
        ]
    };

    let mut used = Harness::new(5);
    assert!(used.send(Frame::binary("123456")).is_err());
    let mut fresh = Harness::new(5);

    let used_outcomes: Vec<bool> = frames().into_iter().map(|f| used.send(f).is_ok()).collect();
    let fresh_outcomes: Vec<bool> = frames().into_iter().map(|f| fresh.send(f).is_ok()).collect();

    assert_eq!(used_outcomes, fresh_outcomes);
    assert_eq!(used.delivered(), fresh.delivered());
}
