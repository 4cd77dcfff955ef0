//! Parallel: every pending child runs each tick until a threshold is crossed.
//!
//! With `n` children and success threshold `t`, the node succeeds once `t` children succeeded and
//! fails once `n - t + 1` failed, the point where `t` successes are out of reach. Children still
//! running at that moment are cancelled by terminate.

use arbiter_core::{Blackboard, Status, TickContext};

use crate::node::{CompositeRole, NodeId};
use crate::tree::Tree;

impl Tree {
    pub(crate) fn update_parallel(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        bb: &mut Blackboard,
    ) -> Status {
        let len = self.composite(id).children.len();
        if len == 0 {
            return Status::Success;
        }
        let CompositeRole::Parallel { threshold } = self.composite(id).role else {
            unreachable!("node {id} is not a parallel");
        };
        let failure_limit = len - threshold + 1;

        for index in 0..len {
            if self.composite(id).completed[index] {
                continue;
            }

            let child = self.composite(id).children[index];
            match self.run(child, ctx, bb) {
                Status::Success => {
                    let c = self.composite_mut(id);
                    c.completed[index] = true;
                    c.successes += 1;
                    if c.successes >= threshold {
                        return Status::Success;
                    }
                }
                Status::Failure => {
                    let c = self.composite_mut(id);
                    c.completed[index] = true;
                    c.failures += 1;
                    if c.failures >= failure_limit {
                        return Status::Failure;
                    }
                }
                Status::Running | Status::Idle => {}
            }
        }

        Status::Running
    }
}
