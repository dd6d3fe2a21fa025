//! Configuration file loading, saving and validation

use comfort_vignette::config::{BackgroundMode, Config, MaskMode, EXAMPLE_CONFIG};
use comfort_vignette::simulation::Scenario;
use comfort_vignette::Error;
use tempfile::tempdir;

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vignette.yaml");

    let mut config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    config.effect.coverage = 0.6;
    config.effect.appearance.mask_mode = MaskMode::Portal;
    config.simulation.scenario = Scenario::Strafe;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.effect.appearance.mask_mode, MaskMode::Portal);
}

#[test]
fn test_example_config_written_to_disk_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("example.yaml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let config = Config::from_file(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.presets["strong"].appearance.background_mode, BackgroundMode::Skybox);
    assert_eq!(config.effect.appearance.mask_mode, MaskMode::Off);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Config::from_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Config::default().to_file(dir.path().join("missing").join("vignette.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let result = Config::from_yaml("effect: [not, a, map]");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_yaml("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_effect_section() {
    let config = Config::from_yaml(
        "effect:\n  coverage: 0.5\n  velocity:\n    enabled: true\n    max: 2.0\n",
    )
    .unwrap();
    assert_eq!(config.effect.coverage, 0.5);
    assert!(config.effect.velocity.enabled);
    assert_eq!(config.effect.velocity.max, 2.0);
    assert_eq!(config.effect.velocity.smoothing, 0.5);
    // Untouched channels keep their defaults
    assert!(config.effect.angular.enabled);
    assert_eq!(config.effect.angular.max, 180.0);
}

#[test]
fn test_invalid_preset_is_reported_by_name() {
    let config = Config::from_yaml("presets:\n  broken:\n    coverage: 3.0\n").unwrap();
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("broken")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_invalid_simulation_settings() {
    let mut config = Config::default();
    config.simulation.target_fps = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.simulation.jitter = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_scenario_names() {
    let config = Config::from_yaml("simulation:\n  scenario: sprint\n").unwrap();
    assert_eq!(config.simulation.scenario, Scenario::Sprint);
    assert_eq!(Scenario::Sprint.to_string(), "sprint");
}
