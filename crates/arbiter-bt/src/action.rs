use arbiter_core::{Blackboard, Status, TickContext};

/// Guard predicate for precondition nodes. Must be side-effect free and cheap enough to call on
/// every reachable tick.
pub type Guard = Box<dyn Fn(&Blackboard) -> bool>;

/// Leaf behavior.
///
/// The tree drives the lifecycle: `initialize` when an activation starts, `update` once per tick
/// while the activation lasts, `terminate` exactly once when it ends. A forced reset ends the
/// activation with `terminate(Status::Idle)`.
///
/// `update` must not block. Unfinished work returns `Status::Running` and continues next tick.
/// Returning `Status::Idle` from `update` is a contract violation; the tree treats it as
/// `Failure`.
pub trait Action: 'static {
    fn initialize(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) {}

    fn update(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status;

    fn terminate(&mut self, _status: Status, _ctx: &TickContext, _blackboard: &mut Blackboard) {}
}

/// Leaf that succeeds when its predicate holds and fails otherwise, within a single tick.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F> Action for Condition<F>
where
    F: Fn(&Blackboard) -> bool + 'static,
{
    fn update(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        if (self.cond)(&*blackboard) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
