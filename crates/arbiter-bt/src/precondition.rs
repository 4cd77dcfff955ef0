//! Precondition: a guarded gate around one child.
//!
//! Reevaluation decides, at the start of every update, whether the child may run this tick:
//!
//! 1. `LowPriority`/`Both` under a selector: if this node sits left of the selector's cursor and
//!    the guard holds, cancel the child at the cursor, move the cursor here and allow.
//! 2. `SelfOnly`/`Both`, or the child is not running yet: allow only if the guard holds.
//! 3. Otherwise the running child is left to finish.
//!
//! A missing guard never holds.

use arbiter_core::{Blackboard, Status, TickContext};
use arbiter_tools::tags;

use crate::node::{CompositeRole, NodeId, NodeKind};
use crate::tree::Tree;

impl Tree {
    pub(crate) fn update_precondition(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        bb: &mut Blackboard,
    ) -> Status {
        if self.reevaluate(id, ctx, bb) {
            let child = self.precondition(id).child;
            self.run(child, ctx, bb)
        } else {
            Status::Failure
        }
    }

    fn reevaluate(&mut self, id: NodeId, ctx: &TickContext, bb: &mut Blackboard) -> bool {
        let abort = self.precondition(id).abort;

        if abort.aborts_lower_priority() {
            if let Some(parent) = self.selector_parent(id) {
                let Some(index) = self.composite(parent).children.iter().position(|&c| c == id)
                else {
                    tracing::warn!(
                        node = %self.node(id).name,
                        parent = %self.node(parent).name,
                        "precondition missing from its selector parent; denying preemption"
                    );
                    self.trace(id, tags::REEVALUATE_ORPHAN, None, parent.index() as u64, ctx, bb);
                    return false;
                };

                let cursor = self.composite(parent).cursor;
                if index < cursor && self.guard_holds(id, bb) {
                    let preempted = self.composite(parent).children[cursor];
                    self.reset_node(preempted, ctx, bb);
                    self.composite_mut(parent).cursor = index;
                    self.trace(id, tags::SELECTOR_PREEMPT, None, cursor as u64, ctx, bb);
                    return true;
                }
            }
        }

        let child = self.precondition(id).child;
        if abort.aborts_self() || self.node(child).status != Status::Running {
            return self.guard_holds(id, bb);
        }
        true
    }

    fn guard_holds(&self, id: NodeId, bb: &Blackboard) -> bool {
        self.precondition(id).guard.as_ref().is_some_and(|guard| guard(bb))
    }

    fn selector_parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        match &self.node(parent).kind {
            NodeKind::Composite(c) if c.role == CompositeRole::Selector => Some(parent),
            _ => None,
        }
    }
}
