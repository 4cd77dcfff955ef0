//! Arena records for tree nodes.
//!
//! Ownership flows one way: the [`Tree`](crate::Tree) owns every node, composites and
//! preconditions only hold child ids, and the parent link is a plain id back-reference.

use core::fmt;

use arbiter_core::Status;

use crate::action::{Action, Guard};

/// Handle to a node inside one tree (or the builder that produced it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Preemption rights of a precondition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AbortMode {
    /// Guard is checked only before the child starts; a running child is left alone.
    #[default]
    None,
    /// Guard is checked every tick; turning false cancels the running child.
    SelfOnly,
    /// Guard turning true interrupts a lower-priority sibling running under the parent selector.
    LowPriority,
    /// `SelfOnly` and `LowPriority` together.
    Both,
}

impl AbortMode {
    pub fn aborts_self(self) -> bool {
        matches!(self, AbortMode::SelfOnly | AbortMode::Both)
    }

    pub fn aborts_lower_priority(self) -> bool {
        matches!(self, AbortMode::LowPriority | AbortMode::Both)
    }
}

/// Public kind tag, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Action,
    Selector,
    Sequence,
    Parallel,
    Precondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompositeRole {
    Selector,
    Sequence,
    Parallel { threshold: usize },
}

pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) status: Status,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

pub(crate) enum NodeKind {
    Action(Box<dyn Action>),
    Composite(Composite),
    Precondition(Precondition),
}

impl NodeKind {
    pub(crate) fn tag(&self) -> Kind {
        match self {
            NodeKind::Action(_) => Kind::Action,
            NodeKind::Composite(c) => match c.role {
                CompositeRole::Selector => Kind::Selector,
                CompositeRole::Sequence => Kind::Sequence,
                CompositeRole::Parallel { .. } => Kind::Parallel,
            },
            NodeKind::Precondition(_) => Kind::Precondition,
        }
    }
}

/// Shared record for every composite role. Fields a role does not use stay at their defaults.
pub(crate) struct Composite {
    pub(crate) role: CompositeRole,
    pub(crate) children: Vec<NodeId>,
    /// Active or pending child. Only meaningful while the composite is running.
    pub(crate) cursor: usize,
    /// Per child: is it a precondition allowed to preempt lower-priority siblings.
    pub(crate) reevaluate: Vec<bool>,
    /// Parallel: which children concluded during the current activation.
    pub(crate) completed: Vec<bool>,
    pub(crate) successes: usize,
    pub(crate) failures: usize,
}

impl Composite {
    pub(crate) fn new(role: CompositeRole, children: Vec<NodeId>, reevaluate: Vec<bool>) -> Self {
        let completed = vec![false; children.len()];
        Self {
            role,
            children,
            cursor: 0,
            reevaluate,
            completed,
            successes: 0,
            failures: 0,
        }
    }
}

pub(crate) struct Precondition {
    pub(crate) child: NodeId,
    pub(crate) guard: Option<Guard>,
    pub(crate) abort: AbortMode,
}
