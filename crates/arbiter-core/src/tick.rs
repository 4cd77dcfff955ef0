use std::time::Duration;

/// Per-tick information handed to every node.
///
/// `now` is the driver clock's reading at the start of the tick. Leaves that need elapsed time
/// record `now` in `initialize` and compare against later readings, which keeps them correct when
/// ticks arrive late or early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: u64,
    pub now: Duration,
}

impl TickContext {
    pub fn new(tick: u64, now: Duration) -> Self {
        Self { tick, now }
    }

    /// Time elapsed since `since`, saturating at zero if the clock reading is older.
    pub fn elapsed_since(&self, since: Duration) -> Duration {
        self.now.saturating_sub(since)
    }
}

impl Default for TickContext {
    fn default() -> Self {
        Self::new(0, Duration::ZERO)
    }
}
