//! Observability hooks for arbiter behavior trees.
//!
//! The engine never logs on its own behalf at trace points. It emits [`TraceEvent`]s into whatever
//! sink the host stored on the blackboard, and does nothing when no sink is present.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, is_observed, tags, TraceEvent, TraceLog, TraceSink, TracingSink, TRACE_LOG, TRACE_SINK,
};
