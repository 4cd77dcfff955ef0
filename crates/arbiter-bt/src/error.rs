use thiserror::Error;

use crate::node::NodeId;

/// Assembly-time contract violations. A tree that builds never hits these while ticking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {node} is not a composite and cannot take children")]
    NotComposite { node: NodeId },

    #[error("node {node} is not a decorator")]
    NotDecorator { node: NodeId },

    #[error("decorator {node} already has a child")]
    ChildAlreadyAttached { node: NodeId },

    #[error("node {child} already has a parent")]
    DuplicateParent { child: NodeId },

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("decorator {node} has no child")]
    MissingChild { node: NodeId },

    #[error("parallel {node} threshold {threshold} outside 1..={children}")]
    InvalidThreshold {
        node: NodeId,
        threshold: usize,
        children: usize,
    },

    #[error("root {node} has a parent")]
    RootHasParent { node: NodeId },

    #[error("node {node} is not reachable from the root")]
    Detached { node: NodeId },
}

pub type Result<T> = std::result::Result<T, BuildError>;
