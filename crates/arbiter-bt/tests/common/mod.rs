#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use arbiter_bt::{Action, Blackboard, Status, TickContext};
use arbiter_core::BbKey;

/// Shared, ordered record of lifecycle calls across every probe in a tree.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }
}

/// Leaf whose update result is read from the blackboard, defaulting to `Running`.
pub struct Probe {
    name: &'static str,
    outcome: BbKey<Status>,
    journal: Journal,
}

impl Probe {
    pub fn new(name: &'static str, outcome: BbKey<Status>, journal: &Journal) -> Self {
        Self {
            name,
            outcome,
            journal: journal.clone(),
        }
    }
}

impl Action for Probe {
    fn initialize(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) {
        self.journal.record(format!("{}.init", self.name));
    }

    fn update(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        self.journal.record(format!("{}.update", self.name));
        blackboard.get_or(self.outcome, Status::Running)
    }

    fn terminate(&mut self, status: Status, _ctx: &TickContext, _blackboard: &mut Blackboard) {
        self.journal.record(format!("{}.terminate({status})", self.name));
    }
}

pub const OUT_A: BbKey<Status> = BbKey::new(1);
pub const OUT_B: BbKey<Status> = BbKey::new(2);
pub const OUT_C: BbKey<Status> = BbKey::new(3);
pub const OUT_D: BbKey<Status> = BbKey::new(4);
pub const GUARD_A: BbKey<bool> = BbKey::new(10);
pub const GUARD_B: BbKey<bool> = BbKey::new(11);

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, Duration::from_millis(tick * 100))
}

pub fn guard(key: BbKey<bool>) -> impl Fn(&Blackboard) -> bool + 'static {
    move |bb| bb.get_or(key, false)
}
