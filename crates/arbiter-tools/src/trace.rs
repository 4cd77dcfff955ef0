#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use arbiter_core::{BbKey, Blackboard, Status};

/// Tags emitted by the behavior tree engine.
pub mod tags {
    /// A node started a new activation (initialize ran).
    pub const NODE_ENTER: &str = "bt.node.enter";
    /// A node concluded an activation with `Success` or `Failure`.
    pub const NODE_EXIT: &str = "bt.node.exit";
    /// A running node was force-cancelled.
    pub const NODE_RESET: &str = "bt.node.reset";
    /// A precondition took over its selector parent; `value` is the preempted child index.
    pub const SELECTOR_PREEMPT: &str = "bt.selector.preempt";
    /// A precondition could not find itself among its selector parent's children.
    pub const REEVALUATE_ORPHAN: &str = "bt.reevaluate.orphan";
    /// Root result for one tick.
    pub const TICK: &str = "bt.tick";
}

/// One observation from a running tree.
///
/// Plain data so it can be buffered during a tick and rendered later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub node: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<Status>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            node: None,
            label: None,
            status: None,
            value: 0,
        }
    }

    pub fn with_node(mut self, node: usize, label: impl Into<String>) -> Self {
        self.node = Some(node);
        self.label = Some(label.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Forwards events to the `tracing` facade at `DEBUG` level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&mut self, event: TraceEvent) {
        let label = event.label.as_deref().unwrap_or("-");
        let status = event.status.map(Status::as_str).unwrap_or("-");
        tracing::debug!(
            tick = event.tick,
            tag = %event.tag,
            node = label,
            status,
            value = event.value,
            "bt trace"
        );
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Events carrying `tag`, in emission order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0xA4B1_7E00_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new(0xA4B1_7E00_0000_0002);

/// Whether any hook is installed. Callers use this to skip building events nobody will see.
pub fn is_observed(blackboard: &Blackboard) -> bool {
    blackboard.contains(TRACE_LOG) || blackboard.contains(TRACE_SINK)
}

pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
