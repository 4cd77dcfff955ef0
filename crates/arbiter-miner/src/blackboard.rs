//! The miner's world state, kept on the shared blackboard.

use arbiter_core::{BbKey, Blackboard};

use crate::config::MinerConfig;

pub const MAX_ENERGY: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Home,
    Mine,
    School,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Home => "home",
            Position::Mine => "mine",
            Position::School => "school",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const POSITION: BbKey<Position> = BbKey::new(0x4D31_0000_0000_0001);
/// Where the current trip is heading; `None` until the first trip starts.
pub const DESTINATION: BbKey<Option<Position>> = BbKey::new(0x4D31_0000_0000_0002);
pub const ENERGY: BbKey<u32> = BbKey::new(0x4D31_0000_0000_0003);
/// Driver frame counter, maintained by the host loop.
pub const FRAME: BbKey<u64> = BbKey::new(0x4D31_0000_0000_0004);

/// Fresh miner state: at home, nowhere to go, `initial_energy` (clamped).
pub fn seed(blackboard: &mut Blackboard, config: &MinerConfig) {
    blackboard.set(POSITION, Position::Home);
    blackboard.set(DESTINATION, None);
    blackboard.set(ENERGY, config.initial_energy.min(MAX_ENERGY));
    blackboard.set(FRAME, 0);
}

pub fn position(blackboard: &Blackboard) -> Position {
    blackboard.get_or(POSITION, Position::Home)
}

pub fn destination(blackboard: &Blackboard) -> Option<Position> {
    blackboard.get_or(DESTINATION, None)
}

pub fn energy(blackboard: &Blackboard) -> u32 {
    blackboard.get_or(ENERGY, MAX_ENERGY)
}

/// Add `delta` to the energy, clamped to `0..=MAX_ENERGY`.
pub fn adjust_energy(blackboard: &mut Blackboard, delta: i64) -> u32 {
    let next = (i64::from(energy(blackboard)) + delta).clamp(0, i64::from(MAX_ENERGY)) as u32;
    blackboard.set(ENERGY, next);
    next
}

pub fn is_mine(blackboard: &Blackboard) -> bool {
    position(blackboard) == Position::Mine
}

/// At school, or still at the mine with a trip home or to school under way.
pub fn is_school_over(blackboard: &Blackboard) -> bool {
    match (position(blackboard), destination(blackboard)) {
        (Position::School, _) => true,
        (Position::Mine, Some(Position::Home | Position::School)) => true,
        _ => false,
    }
}

pub fn is_energy_low(blackboard: &Blackboard, threshold: u32) -> bool {
    energy(blackboard) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_clamped_both_ways() {
        let mut bb = Blackboard::new();
        seed(&mut bb, &MinerConfig::default());

        assert_eq!(adjust_energy(&mut bb, 30), MAX_ENERGY);
        assert_eq!(adjust_energy(&mut bb, -70), 30);
        assert_eq!(adjust_energy(&mut bb, -40), 0);
        assert_eq!(energy(&bb), 0);
    }

    #[test]
    fn seed_clamps_initial_energy() {
        let mut bb = Blackboard::new();
        let config = MinerConfig {
            initial_energy: 250,
            ..MinerConfig::default()
        };
        seed(&mut bb, &config);
        assert_eq!(energy(&bb), MAX_ENERGY);
        assert_eq!(position(&bb), Position::Home);
        assert_eq!(destination(&bb), None);
    }

    #[test]
    fn school_is_over_on_the_way_out_of_the_mine() {
        let mut bb = Blackboard::new();
        bb.set(POSITION, Position::Mine);
        assert!(!is_school_over(&bb));

        bb.set(DESTINATION, Some(Position::Mine));
        assert!(!is_school_over(&bb));

        bb.set(DESTINATION, Some(Position::Home));
        assert!(is_school_over(&bb));

        bb.set(DESTINATION, Some(Position::School));
        assert!(is_school_over(&bb));

        bb.set(POSITION, Position::School);
        bb.set(DESTINATION, Some(Position::Home));
        assert!(is_school_over(&bb));

        bb.set(POSITION, Position::Home);
        assert!(!is_school_over(&bb));
    }

    #[test]
    fn low_energy_threshold_is_inclusive() {
        let mut bb = Blackboard::new();
        bb.set(ENERGY, 20);
        assert!(is_energy_low(&bb, 20));
        bb.set(ENERGY, 21);
        assert!(!is_energy_low(&bb, 20));
    }
}
