//! Fixed-cadence tick loop.

use std::time::Duration;

use arbiter_core::{Blackboard, Clock, Status, TickContext};

use crate::tree::Tree;

/// Outcome of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub status: Status,
    /// Time the root tick took, as measured by the driver clock.
    pub elapsed: Duration,
    /// Time left in the cycle; `None` when the tick used the whole period or more.
    pub remaining: Option<Duration>,
}

impl TickReport {
    pub fn overran(&self) -> bool {
        self.remaining.is_none()
    }
}

/// Owns a tree and ticks its root once per `period`.
pub struct TreeDriver<C: Clock> {
    tree: Tree,
    clock: C,
    period: Duration,
    next_tick: u64,
    last: Status,
}

impl<C: Clock> TreeDriver<C> {
    pub fn new(tree: Tree, clock: C, period: Duration) -> Self {
        Self {
            tree,
            clock,
            period,
            next_tick: 0,
            last: Status::Idle,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.next_tick
    }

    pub fn last_status(&self) -> Status {
        self.last
    }

    /// Tick the root once, without sleeping.
    pub fn step(&mut self, blackboard: &mut Blackboard) -> TickReport {
        let started = self.clock.now();
        let ctx = TickContext::new(self.next_tick, started);
        let status = self.tree.tick(&ctx, blackboard);
        let elapsed = self.clock.now().saturating_sub(started);

        self.next_tick += 1;
        self.last = status;

        TickReport {
            tick: ctx.tick,
            status,
            elapsed,
            remaining: self.period.checked_sub(elapsed).filter(|d| !d.is_zero()),
        }
    }

    /// Run `frames` cycles, sleeping out the remainder of each one. Returns the last root status.
    pub fn run_frames(&mut self, frames: u64, blackboard: &mut Blackboard) -> Status {
        self.run_frames_with(frames, blackboard, |_, _| {})
    }

    /// Like [`TreeDriver::run_frames`], calling `on_tick` after every tick and before sleeping.
    /// The callback may write to the blackboard; the next tick sees its changes.
    pub fn run_frames_with(
        &mut self,
        frames: u64,
        blackboard: &mut Blackboard,
        mut on_tick: impl FnMut(&TickReport, &mut Blackboard),
    ) -> Status {
        for _ in 0..frames {
            let report = self.step(blackboard);
            on_tick(&report, &mut *blackboard);
            match report.remaining {
                Some(rest) => self.clock.sleep(rest),
                None => tracing::warn!(
                    tick = report.tick,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    period_ms = self.period.as_millis() as u64,
                    "tree timeout: tick overran its cycle"
                ),
            }
        }
        self.last
    }

    /// Cancel anything still running, using the current clock reading.
    pub fn reset(&mut self, blackboard: &mut Blackboard) {
        let ctx = TickContext::new(self.next_tick, self.clock.now());
        self.tree.reset(&ctx, blackboard);
        self.last = Status::Idle;
    }
}
