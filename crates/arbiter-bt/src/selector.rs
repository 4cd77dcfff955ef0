//! Selector: children in priority order, first non-failure wins.
//!
//! A running selector keeps its cursor on the active child. Before resuming there, it re-runs
//! every higher-priority child flagged for reevaluation; such a precondition may take the cursor
//! over (see `precondition.rs`), cancelling the child that was running.

use arbiter_core::{Blackboard, Status, TickContext};

use crate::node::NodeId;
use crate::tree::Tree;

impl Tree {
    pub(crate) fn update_selector(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        bb: &mut Blackboard,
    ) -> Status {
        let len = self.composite(id).children.len();
        if len == 0 {
            return Status::Success;
        }

        let mut index = 0;
        while index < self.composite(id).cursor {
            if !self.composite(id).reevaluate[index] {
                index += 1;
                continue;
            }

            let child = self.composite(id).children[index];
            let status = self.run(child, ctx, bb);
            let cursor = self.composite(id).cursor;

            if status != Status::Failure {
                if cursor != index {
                    let preempted = self.composite(id).children[cursor];
                    self.reset_node(preempted, ctx, bb);
                    self.composite_mut(id).cursor = index;
                }
                return status;
            }

            if cursor == index {
                // Took over, then its own child failed: resume with the next sibling.
                self.composite_mut(id).cursor = index + 1;
                break;
            }
            index += 1;
        }

        loop {
            let cursor = self.composite(id).cursor;
            let child = self.composite(id).children[cursor];
            let status = self.run(child, ctx, bb);
            if status != Status::Failure {
                return status;
            }

            if cursor + 1 == len {
                self.composite_mut(id).cursor = 0;
                return Status::Failure;
            }
            self.composite_mut(id).cursor = cursor + 1;
        }
    }
}
