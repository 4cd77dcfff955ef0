use arbiter_core::{Blackboard, Status, TickContext};

use crate::node::NodeId;
use crate::tree::Tree;

impl Tree {
    /// Ordered AND-chain. Resumes at the cursor; the first non-success result is returned as is.
    pub(crate) fn update_sequence(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        bb: &mut Blackboard,
    ) -> Status {
        let len = self.composite(id).children.len();
        if len == 0 {
            return Status::Success;
        }

        loop {
            let cursor = self.composite(id).cursor;
            let child = self.composite(id).children[cursor];
            let status = self.run(child, ctx, bb);
            if status != Status::Success {
                return status;
            }

            if cursor + 1 == len {
                self.composite_mut(id).cursor = 0;
                return Status::Success;
            }
            self.composite_mut(id).cursor = cursor + 1;
        }
    }
}
