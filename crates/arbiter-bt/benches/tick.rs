use std::time::Duration;

use arbiter_bt::{AbortMode, Blackboard, Condition, TickContext, TreeBuilder};
use arbiter_core::BbKey;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FLAG: BbKey<bool> = BbKey::new(1);

fn always_true(_bb: &Blackboard) -> bool {
    true
}

fn bench_sequence_tick(c: &mut Criterion) {
    let mut b = TreeBuilder::new();
    let root = b.sequence("root");
    for i in 0..32 {
        let leaf = b.action(format!("cond{i}"), Condition::new(always_true));
        b.add_child(root, leaf).unwrap();
    }
    let mut tree = b.build(root).unwrap();
    let mut bb = Blackboard::new();

    let mut tick: u64 = 0;
    c.bench_function("arbiter-bt/tick(sequence, conditions=32)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, Duration::from_millis(tick));
            black_box(tree.tick(&ctx, &mut bb));
            tick = tick.wrapping_add(1);
        })
    });
}

/// 16 guarded branches in front of a running fallback; every guard is reevaluated each tick.
fn bench_selector_reevaluation(c: &mut Criterion) {
    struct Busy;
    impl arbiter_bt::Action for Busy {
        fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> arbiter_bt::Status {
            arbiter_bt::Status::Running
        }
    }

    let mut b = TreeBuilder::new();
    let root = b.selector("root");
    for i in 0..16 {
        let pre = b.precondition(format!("pre{i}"), AbortMode::Both, |bb| bb.get_or(FLAG, false));
        let leaf = b.action(format!("leaf{i}"), Condition::new(always_true));
        b.set_child(pre, leaf).unwrap();
        b.add_child(root, pre).unwrap();
    }
    let fallback = b.action("fallback", Busy);
    b.add_child(root, fallback).unwrap();
    let mut tree = b.build(root).unwrap();
    let mut bb = Blackboard::new();

    let mut tick: u64 = 0;
    c.bench_function("arbiter-bt/tick(selector, reevaluated=16)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, Duration::from_millis(tick));
            black_box(tree.tick(&ctx, &mut bb));
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_sequence_tick, bench_selector_reevaluation);
criterion_main!(benches);
