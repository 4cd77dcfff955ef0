//! Scenario configuration loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Miner scenario tuning, loaded from `.arbiter/miner.yaml`.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Tick period of the driver loop
    #[serde(default = "default_cycle_ms")]
    pub cycle_ms: u64,

    /// Frames the binary runs before exiting
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,

    #[serde(default = "default_initial_energy")]
    pub initial_energy: u32,

    /// Energy at or below this counts as low
    #[serde(default = "default_low_energy_threshold")]
    pub low_energy_threshold: u32,

    #[serde(default = "default_travel_ms")]
    pub travel_ms: u64,

    #[serde(default = "default_mining_ms")]
    pub mining_ms: u64,

    #[serde(default = "default_mining_energy_cost")]
    pub mining_energy_cost: u32,

    #[serde(default = "default_heat_water_ms")]
    pub heat_water_ms: u64,

    #[serde(default = "default_rest_ms")]
    pub rest_ms: u64,

    #[serde(default = "default_rest_energy_gain")]
    pub rest_energy_gain: u32,
}

fn default_cycle_ms() -> u64 {
    500
}
fn default_max_frames() -> u64 {
    12
}
fn default_initial_energy() -> u32 {
    100
}
fn default_low_energy_threshold() -> u32 {
    20
}
fn default_travel_ms() -> u64 {
    500
}
fn default_mining_ms() -> u64 {
    500
}
fn default_mining_energy_cost() -> u32 {
    40
}
fn default_heat_water_ms() -> u64 {
    500
}
fn default_rest_ms() -> u64 {
    1000
}
fn default_rest_energy_gain() -> u32 {
    100
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            cycle_ms: default_cycle_ms(),
            max_frames: default_max_frames(),
            initial_energy: default_initial_energy(),
            low_energy_threshold: default_low_energy_threshold(),
            travel_ms: default_travel_ms(),
            mining_ms: default_mining_ms(),
            mining_energy_cost: default_mining_energy_cost(),
            heat_water_ms: default_heat_water_ms(),
            rest_ms: default_rest_ms(),
            rest_energy_gain: default_rest_energy_gain(),
        }
    }
}

impl MinerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from a working directory (looks for .arbiter/miner.yaml)
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".arbiter/miner.yaml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn cycle(&self) -> Duration {
        Duration::from_millis(self.cycle_ms)
    }
}
