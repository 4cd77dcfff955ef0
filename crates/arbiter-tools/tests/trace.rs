use std::cell::RefCell;
use std::rc::Rc;

use arbiter_core::{Blackboard, Status};
use arbiter_tools::{emit, is_observed, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn unobserved_blackboard_drops_events() {
    let mut bb = Blackboard::new();
    assert!(!is_observed(&bb));

    emit(&mut bb, TraceEvent::new(1, "ignored"));
    assert!(bb.is_empty());
}

#[test]
fn emit_writes_to_trace_log_when_present() {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());
    assert!(is_observed(&bb));

    emit(
        &mut bb,
        TraceEvent::new(1, "test")
            .with_node(4, "mining")
            .with_status(Status::Running)
            .with_value(20),
    );

    let log = bb.get(TRACE_LOG).unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 1);
    assert_eq!(log.events[0].tag, "test");
    assert_eq!(log.events[0].node, Some(4));
    assert_eq!(log.events[0].label.as_deref(), Some("mining"));
    assert_eq!(log.events[0].status, Some(Status::Running));
    assert_eq!(log.events[0].value, 20);
}

#[test]
fn emit_writes_to_both_log_and_sink_when_both_present() {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());

    let handle = RcSink::default();
    let shared = handle.0.clone();
    bb.set(TRACE_SINK, Box::new(handle) as Box<dyn TraceSink>);

    emit(&mut bb, TraceEvent::new(3, "both"));

    let log = bb.get(TRACE_LOG).unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.with_tag("both").count(), 1);

    let events = shared.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tag, "both");
}
