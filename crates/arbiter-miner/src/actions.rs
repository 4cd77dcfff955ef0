//! Timed leaf actions for the miner.
//!
//! Each one records the tick time it started at and finishes once its duration has elapsed on the
//! driver clock. None of them fail; cancellation arrives as a reset.

use std::time::Duration;

use arbiter_bt::{Action, Blackboard, Status, TickContext};

use crate::blackboard::{self, Position, DESTINATION, POSITION};

/// Travel to `destination`. The destination is published when the trip starts, the position only
/// changes on arrival.
pub struct ChangePosition {
    destination: Position,
    travel: Duration,
    started: Duration,
}

impl ChangePosition {
    pub fn new(destination: Position, travel: Duration) -> Self {
        Self {
            destination,
            travel,
            started: Duration::ZERO,
        }
    }
}

impl Action for ChangePosition {
    fn initialize(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) {
        self.started = ctx.now;
        blackboard.set(DESTINATION, Some(self.destination));
    }

    fn update(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        if ctx.elapsed_since(self.started) < self.travel {
            return Status::Running;
        }
        blackboard.set(POSITION, self.destination);
        tracing::debug!(tick = ctx.tick, position = %self.destination, "arrived");
        Status::Success
    }

    fn terminate(&mut self, status: Status, ctx: &TickContext, _blackboard: &mut Blackboard) {
        if status == Status::Idle {
            tracing::debug!(tick = ctx.tick, destination = %self.destination, "trip abandoned");
        }
    }
}

/// Dig for `duration`, paying `cost` energy when done.
pub struct Mining {
    duration: Duration,
    cost: u32,
    started: Duration,
}

impl Mining {
    pub fn new(duration: Duration, cost: u32) -> Self {
        Self {
            duration,
            cost,
            started: Duration::ZERO,
        }
    }
}

impl Action for Mining {
    fn initialize(&mut self, ctx: &TickContext, _blackboard: &mut Blackboard) {
        self.started = ctx.now;
    }

    fn update(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        if ctx.elapsed_since(self.started) < self.duration {
            return Status::Running;
        }
        let energy = blackboard::adjust_energy(blackboard, -i64::from(self.cost));
        tracing::debug!(tick = ctx.tick, energy, "mined");
        Status::Success
    }
}

pub struct HeatWater {
    duration: Duration,
    started: Duration,
}

impl HeatWater {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: Duration::ZERO,
        }
    }
}

impl Action for HeatWater {
    fn initialize(&mut self, ctx: &TickContext, _blackboard: &mut Blackboard) {
        self.started = ctx.now;
    }

    fn update(&mut self, ctx: &TickContext, _blackboard: &mut Blackboard) -> Status {
        if ctx.elapsed_since(self.started) < self.duration {
            Status::Running
        } else {
            Status::Success
        }
    }
}

/// Sleep for `duration`, then recover `gain` energy.
pub struct Rest {
    duration: Duration,
    gain: u32,
    started: Duration,
}

impl Rest {
    pub fn new(duration: Duration, gain: u32) -> Self {
        Self {
            duration,
            gain,
            started: Duration::ZERO,
        }
    }
}

impl Action for Rest {
    fn initialize(&mut self, ctx: &TickContext, _blackboard: &mut Blackboard) {
        self.started = ctx.now;
    }

    fn update(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        if ctx.elapsed_since(self.started) < self.duration {
            return Status::Running;
        }
        let energy = blackboard::adjust_energy(blackboard, i64::from(self.gain));
        tracing::debug!(tick = ctx.tick, energy, "rested");
        Status::Success
    }
}
