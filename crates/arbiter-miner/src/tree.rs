//! Miner tree assembly.

use std::time::Duration;

use arbiter_bt::{AbortMode, Result, Tree, TreeBuilder};

use crate::actions::{ChangePosition, HeatWater, Mining, Rest};
use crate::blackboard::{self, Position};
use crate::config::MinerConfig;

/// Assemble the miner's decision tree.
///
/// ```text
/// position_selector
/// ├─ is_school_over (Both) → school_sequence [go_school, go_home_from_school]
/// ├─ is_mine (SelfOnly) → mine_selector
/// │    ├─ is_energy_low_at_mine (SelfOnly) → go_home_from_mine
/// │    └─ mining
/// └─ home_selector
///      ├─ is_energy_low_at_home (SelfOnly) → home_parallel(2) [heat_water, rest]
///      └─ go_mine_from_home
/// ```
pub fn build_tree(config: &MinerConfig) -> Result<Tree> {
    let travel = Duration::from_millis(config.travel_ms);
    let low = config.low_energy_threshold;
    let mut t = TreeBuilder::new();

    let root = t.selector("position_selector");

    let school_over = t.precondition("is_school_over", AbortMode::Both, blackboard::is_school_over);
    let school_sequence = t.sequence("school_sequence");
    let go_school = t.action("go_school", ChangePosition::new(Position::School, travel));
    let go_home_from_school = t.action(
        "go_home_from_school",
        ChangePosition::new(Position::Home, travel),
    );
    t.set_child(school_over, school_sequence)?;
    t.add_child(school_sequence, go_school)?;
    t.add_child(school_sequence, go_home_from_school)?;

    let at_mine = t.precondition("is_mine", AbortMode::SelfOnly, blackboard::is_mine);
    let mine_selector = t.selector("mine_selector");
    let tired_at_mine = t.precondition("is_energy_low_at_mine", AbortMode::SelfOnly, move |bb| {
        blackboard::is_energy_low(bb, low)
    });
    let go_home_from_mine = t.action(
        "go_home_from_mine",
        ChangePosition::new(Position::Home, travel),
    );
    let mining = t.action(
        "mining",
        Mining::new(Duration::from_millis(config.mining_ms), config.mining_energy_cost),
    );
    t.set_child(at_mine, mine_selector)?;
    t.set_child(tired_at_mine, go_home_from_mine)?;
    t.add_child(mine_selector, tired_at_mine)?;
    t.add_child(mine_selector, mining)?;

    let home_selector = t.selector("home_selector");
    let tired_at_home = t.precondition("is_energy_low_at_home", AbortMode::SelfOnly, move |bb| {
        blackboard::is_energy_low(bb, low)
    });
    let home_parallel = t.parallel("home_parallel", 2);
    let heat_water = t.action(
        "heat_water",
        HeatWater::new(Duration::from_millis(config.heat_water_ms)),
    );
    let rest = t.action(
        "rest",
        Rest::new(Duration::from_millis(config.rest_ms), config.rest_energy_gain),
    );
    let go_mine_from_home = t.action(
        "go_mine_from_home",
        ChangePosition::new(Position::Mine, travel),
    );
    t.set_child(tired_at_home, home_parallel)?;
    t.add_child(home_parallel, heat_water)?;
    t.add_child(home_parallel, rest)?;
    t.add_child(home_selector, tired_at_home)?;
    t.add_child(home_selector, go_mine_from_home)?;

    t.add_child(root, school_over)?;
    t.add_child(root, at_mine)?;
    t.add_child(root, home_selector)?;

    t.build(root)
}
