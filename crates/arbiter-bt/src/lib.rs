//! Behavior tree arbitration engine built on `arbiter-core`.
//!
//! Trees are assembled once with [`TreeBuilder`] into an arena-backed [`Tree`], then ticked. Every
//! node follows the same activation contract (initialize, one or more updates, terminate), and
//! running work is cancelled only through reset.
//!
//! Node kinds:
//! - leaves: any [`Action`] (plus the [`Condition`] convenience leaf)
//! - selector: priority fallback, with live preemption by reevaluating preconditions
//! - sequence: ordered AND-chain
//! - parallel: same-tick fan-out that concludes on a success threshold
//! - precondition: guarded single-child gate with an [`AbortMode`]

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod builder;
pub mod driver;
pub mod error;
pub mod node;
mod parallel;
mod precondition;
mod selector;
mod sequence;
pub mod tree;

pub use action::{Action, Condition, Guard};
pub use builder::TreeBuilder;
pub use driver::{TickReport, TreeDriver};
pub use error::{BuildError, Result};
pub use node::{AbortMode, Kind, NodeId};
pub use tree::Tree;

pub use arbiter_core::{Blackboard, Status, TickContext};
