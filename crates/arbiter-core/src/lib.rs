//! Shared primitives for tick-driven arbitration.
//!
//! Everything here is engine-agnostic: the behavior tree crate builds on these types, and so do
//! the leaf actions and guards that plug into it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod clock;
pub mod status;
pub mod tick;

pub use blackboard::{BbKey, Blackboard};
pub use clock::{Clock, ManualClock, SystemClock};
pub use status::Status;
pub use tick::TickContext;
