//! Miner agent scenario for the arbiter behavior tree engine.
//!
//! A miner shuttles between home, the mine and school. Mining drains energy, a low battery sends
//! it home to heat water and rest, and leaving the mine for home is treated as the end of the
//! school day, which preempts whatever the miner was doing.

#![forbid(unsafe_code)]

pub mod actions;
pub mod blackboard;
pub mod config;
pub mod tree;

pub use actions::{ChangePosition, HeatWater, Mining, Rest};
pub use blackboard::{Position, DESTINATION, ENERGY, FRAME, MAX_ENERGY, POSITION};
pub use config::MinerConfig;
pub use tree::build_tree;
