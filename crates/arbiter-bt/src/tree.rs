//! Arena-backed tree and the node lifecycle shared by every kind.

use std::borrow::Cow;

use arbiter_core::{Blackboard, Status, TickContext};
use arbiter_tools::{emit, is_observed, tags, TraceEvent};

use crate::node::{AbortMode, Composite, CompositeRole, Kind, Node, NodeId, NodeKind, Precondition};

/// An assembled behavior tree.
///
/// Topology is fixed once [`TreeBuilder::build`](crate::TreeBuilder::build) returns. Node status is
/// readable from outside but only changes through [`Tree::tick`] and [`Tree::reset`].
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Run the root once. This is one control cycle.
    pub fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        let status = self.run(self.root, ctx, blackboard);
        if is_observed(blackboard) {
            emit(
                blackboard,
                TraceEvent::new(ctx.tick, tags::TICK)
                    .with_node(self.root.index(), self.nodes[self.root.index()].name.clone())
                    .with_status(status),
            );
        }
        status
    }

    /// Cancel whatever is running under the root. No effect on an idle or concluded tree.
    pub fn reset(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) {
        self.reset_node(self.root, ctx, blackboard);
    }

    pub fn status(&self, id: NodeId) -> Option<Status> {
        self.nodes.get(id.index()).map(|n| n.status)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.index()).map(|n| n.name.as_str())
    }

    pub fn kind(&self, id: NodeId) -> Option<Kind> {
        self.nodes.get(id.index()).map(|n| n.kind.tag())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index())?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Composite(c)) => &c.children,
            Some(NodeKind::Precondition(p)) => core::slice::from_ref(&p.child),
            _ => &[],
        }
    }

    /// Composite cursor; `None` for leaves and preconditions.
    pub fn cursor(&self, id: NodeId) -> Option<usize> {
        match &self.nodes.get(id.index())?.kind {
            NodeKind::Composite(c) => Some(c.cursor),
            _ => None,
        }
    }

    /// Selector reevaluation flags, one per child; `None` for every other kind.
    pub fn reevaluation_flags(&self, id: NodeId) -> Option<&[bool]> {
        match &self.nodes.get(id.index())?.kind {
            NodeKind::Composite(c) if c.role == CompositeRole::Selector => Some(&c.reevaluate),
            _ => None,
        }
    }

    pub fn abort_mode(&self, id: NodeId) -> Option<AbortMode> {
        match &self.nodes.get(id.index())?.kind {
            NodeKind::Precondition(p) => Some(p.abort),
            _ => None,
        }
    }

    /// First node with `name`, in creation order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub(crate) fn run(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        if self.nodes[id.index()].status != Status::Running {
            self.initialize(id, ctx, bb);
            self.trace(id, tags::NODE_ENTER, None, 0, ctx, bb);
        }

        let status = self.update(id, ctx, bb);
        self.nodes[id.index()].status = status;

        if status != Status::Running {
            self.terminate(id, status, ctx, bb);
            self.trace(id, tags::NODE_EXIT, Some(status), 0, ctx, bb);
        }
        status
    }

    pub(crate) fn reset_node(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) {
        if self.nodes[id.index()].status != Status::Running {
            return;
        }
        self.nodes[id.index()].status = Status::Idle;
        self.terminate(id, Status::Idle, ctx, bb);
        self.trace(id, tags::NODE_RESET, Some(Status::Idle), 0, ctx, bb);
    }

    fn initialize(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Action(action) => action.initialize(ctx, bb),
            NodeKind::Composite(c) => {
                c.cursor = 0;
                if let CompositeRole::Parallel { .. } = c.role {
                    c.completed.iter_mut().for_each(|done| *done = false);
                    c.successes = 0;
                    c.failures = 0;
                }
            }
            NodeKind::Precondition(_) => {}
        }
    }

    fn update(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        match self.nodes[id.index()].kind.tag() {
            Kind::Action => self.update_action(id, ctx, bb),
            Kind::Selector => self.update_selector(id, ctx, bb),
            Kind::Sequence => self.update_sequence(id, ctx, bb),
            Kind::Parallel => self.update_parallel(id, ctx, bb),
            Kind::Precondition => self.update_precondition(id, ctx, bb),
        }
    }

    fn terminate(&mut self, id: NodeId, status: Status, ctx: &TickContext, bb: &mut Blackboard) {
        match self.nodes[id.index()].kind.tag() {
            Kind::Action => {
                if let NodeKind::Action(action) = &mut self.nodes[id.index()].kind {
                    action.terminate(status, ctx, bb);
                }
            }
            Kind::Selector | Kind::Sequence => {
                // Concluded children already terminated themselves.
                if status == Status::Idle {
                    let composite = self.composite(id);
                    if let Some(&active) = composite.children.get(composite.cursor) {
                        self.reset_node(active, ctx, bb);
                    }
                }
            }
            Kind::Parallel => {
                for i in 0..self.composite(id).children.len() {
                    let child = self.composite(id).children[i];
                    self.reset_node(child, ctx, bb);
                }
            }
            Kind::Precondition => {
                if matches!(status, Status::Idle | Status::Failure) {
                    let child = self.precondition(id).child;
                    self.reset_node(child, ctx, bb);
                }
            }
        }
    }

    fn update_action(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let node = &mut self.nodes[id.index()];
        let NodeKind::Action(action) = &mut node.kind else {
            unreachable!("node {id} is not an action");
        };
        match action.update(ctx, bb) {
            Status::Idle => {
                tracing::warn!(
                    node = %node.name,
                    "action update returned idle; treating as failure"
                );
                Status::Failure
            }
            status => status,
        }
    }

    pub(crate) fn composite(&self, id: NodeId) -> &Composite {
        match &self.nodes[id.index()].kind {
            NodeKind::Composite(c) => c,
            _ => unreachable!("node {id} is not a composite"),
        }
    }

    pub(crate) fn composite_mut(&mut self, id: NodeId) -> &mut Composite {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Composite(c) => c,
            _ => unreachable!("node {id} is not a composite"),
        }
    }

    pub(crate) fn precondition(&self, id: NodeId) -> &Precondition {
        match &self.nodes[id.index()].kind {
            NodeKind::Precondition(p) => p,
            _ => unreachable!("node {id} is not a precondition"),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn trace(
        &self,
        id: NodeId,
        tag: impl Into<Cow<'static, str>>,
        status: Option<Status>,
        value: u64,
        ctx: &TickContext,
        bb: &mut Blackboard,
    ) {
        if !is_observed(bb) {
            return;
        }
        let mut event = TraceEvent::new(ctx.tick, tag)
            .with_node(id.index(), self.nodes[id.index()].name.clone())
            .with_value(value);
        if let Some(status) = status {
            event = event.with_status(status);
        }
        emit(bb, event);
    }
}
