use std::fs;

use arbiter_miner::MinerConfig;
use tempfile::TempDir;

#[test]
fn defaults_match_the_classic_routine() {
    let config = MinerConfig::default();
    assert_eq!(config.cycle_ms, 500);
    assert_eq!(config.max_frames, 12);
    assert_eq!(config.initial_energy, 100);
    assert_eq!(config.low_energy_threshold, 20);
    assert_eq!(config.travel_ms, 500);
    assert_eq!(config.mining_ms, 500);
    assert_eq!(config.mining_energy_cost, 40);
    assert_eq!(config.heat_water_ms, 500);
    assert_eq!(config.rest_ms, 1000);
    assert_eq!(config.rest_energy_gain, 100);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = MinerConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, MinerConfig::default());
}

#[test]
fn partial_file_overrides_only_what_it_names() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".arbiter")).unwrap();
    fs::write(
        dir.path().join(".arbiter/miner.yaml"),
        "cycle_ms: 100\nmining_energy_cost: 25\n",
    )
    .unwrap();

    let config = MinerConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.cycle_ms, 100);
    assert_eq!(config.mining_energy_cost, 25);
    assert_eq!(config.rest_ms, 1000);
    assert_eq!(config.cycle(), std::time::Duration::from_millis(100));
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("miner.yaml");
    fs::write(&path, "cycle_ms: [not, a, number]\n").unwrap();

    let err = MinerConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
    assert!(err.to_string().contains("miner.yaml"));
}

#[test]
fn unreadable_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = MinerConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}
