use std::time::Duration;

use arbiter_bt::{Action, Blackboard, Condition, Status, TickContext, TreeBuilder, TreeDriver};
use arbiter_core::{BbKey, Clock, ManualClock};

const PERIOD: Duration = Duration::from_millis(500);
const SEEN: BbKey<Vec<(u64, Duration)>> = BbKey::new(1);

/// Records the tick context it was handed and optionally burns clock time.
struct Stamp {
    clock: ManualClock,
    cost: Duration,
}

impl Action for Stamp {
    fn update(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Status {
        blackboard.update(SEEN, |seen| seen.push((ctx.tick, ctx.now)));
        self.clock.advance(self.cost);
        Status::Running
    }
}

fn driver(cost: Duration) -> TreeDriver<ManualClock> {
    let clock = ManualClock::default();
    let mut b = TreeBuilder::new();
    let root = b.action(
        "stamp",
        Stamp {
            clock: clock.clone(),
            cost,
        },
    );
    TreeDriver::new(b.build(root).unwrap(), clock, PERIOD)
}

#[test]
fn step_numbers_ticks_and_reads_the_clock() {
    let mut driver = driver(Duration::from_millis(120));
    let mut bb = Blackboard::new();

    let first = driver.step(&mut bb);
    assert_eq!(first.tick, 0);
    assert_eq!(first.status, Status::Running);
    assert_eq!(first.elapsed, Duration::from_millis(120));
    assert_eq!(first.remaining, Some(Duration::from_millis(380)));
    assert!(!first.overran());

    let second = driver.step(&mut bb);
    assert_eq!(second.tick, 1);
    assert_eq!(driver.ticks(), 2);
    assert_eq!(driver.last_status(), Status::Running);

    // `step` never sleeps, so the second tick starts where the first one ended.
    let seen = bb.get(SEEN).unwrap();
    assert_eq!(
        seen,
        &vec![(0, Duration::ZERO), (1, Duration::from_millis(120))]
    );
}

#[test]
fn run_frames_holds_the_cadence() {
    let mut driver = driver(Duration::from_millis(40));
    let mut bb = Blackboard::new();

    assert_eq!(driver.run_frames(4, &mut bb), Status::Running);
    assert_eq!(driver.ticks(), 4);
    assert_eq!(driver.clock().now(), PERIOD * 4);

    let starts: Vec<_> = bb.get(SEEN).unwrap().iter().map(|&(_, now)| now).collect();
    assert_eq!(starts, vec![PERIOD * 0, PERIOD, PERIOD * 2, PERIOD * 3]);
}

#[test]
fn overrun_skips_the_sleep() {
    let mut driver = driver(Duration::from_millis(700));
    let mut bb = Blackboard::new();

    let mut reports = Vec::new();
    driver.run_frames_with(3, &mut bb, |report, _| reports.push(*report));

    assert!(reports.iter().all(|r| r.overran()));
    assert!(reports.iter().all(|r| r.elapsed == Duration::from_millis(700)));
    assert_eq!(driver.clock().now(), Duration::from_millis(2100));
}

#[test]
fn exact_fit_counts_as_overrun() {
    let mut driver = driver(PERIOD);
    let report = driver.step(&mut Blackboard::new());
    assert_eq!(report.remaining, None);
    assert!(report.overran());
}

#[test]
fn callback_sees_the_blackboard_after_each_tick() {
    let mut driver = driver(Duration::ZERO);
    let mut bb = Blackboard::new();

    let mut lengths = Vec::new();
    driver.run_frames_with(3, &mut bb, |_, bb| {
        lengths.push(bb.get(SEEN).map_or(0, Vec::len));
    });
    assert_eq!(lengths, vec![1, 2, 3]);
}

#[test]
fn concluded_root_restarts_next_frame() {
    let clock = ManualClock::default();
    let mut b = TreeBuilder::new();
    let root = b.action("done", Condition::new(|_: &Blackboard| true));
    let mut driver = TreeDriver::new(b.build(root).unwrap(), clock, PERIOD);

    let mut statuses = Vec::new();
    driver.run_frames_with(3, &mut Blackboard::new(), |report, _| statuses.push(report.status));
    assert_eq!(statuses, vec![Status::Success; 3]);
}

#[test]
fn reset_cancels_the_running_root() {
    let mut driver = driver(Duration::ZERO);
    let mut bb = Blackboard::new();
    driver.step(&mut bb);
    let root = driver.tree().root();
    assert_eq!(driver.tree().status(root), Some(Status::Running));

    driver.reset(&mut bb);
    assert_eq!(driver.tree().status(root), Some(Status::Idle));
    assert_eq!(driver.last_status(), Status::Idle);
    assert_eq!(driver.period(), PERIOD);
}
