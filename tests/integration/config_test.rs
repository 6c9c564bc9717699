//! Configuration integration tests

use rust_decimal_macros::dec;
use strike_edge::config::{Config, LogFormat};
use strike_edge::engine::Engine;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert!(config.validate().is_ok());

    assert_eq!(config.history.capacity, 30);
    assert_eq!(config.history.min_points_for_signal, 10);
    assert_eq!(config.pricing.base_decay_rate, dec!(5));
    assert_eq!(config.ladder.increment, dec!(250));
    assert_eq!(config.ladder.range, 4);
    assert_eq!(config.signal.min_edge, 3.0);
    assert_eq!(config.risk.initial_bankroll, dec!(100));
    assert_eq!(config.session.time_to_expiry_minutes, 45.0);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_config_example_matches_defaults() {
    let example: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let defaults = Config::default();

    assert_eq!(example.history.capacity, defaults.history.capacity);
    assert_eq!(example.ladder.extension_steps, defaults.ladder.extension_steps);
    assert_eq!(example.ladder.proximity_window, defaults.ladder.proximity_window);
    assert_eq!(example.risk.max_bet_fraction, defaults.risk.max_bet_fraction);
    assert_eq!(example.risk.max_edge_multiplier, defaults.risk.max_edge_multiplier);
}

#[test]
fn test_engine_from_custom_config() {
    let config: Config = toml::from_str(
        r#"
        [history]
        capacity = 12
        min_points_for_signal = 5

        [risk]
        initial_bankroll = 40
        "#,
    )
    .unwrap();

    let engine = Engine::new(config).unwrap();
    assert_eq!(engine.bankroll(), dec!(40));
    assert_eq!(engine.history().capacity(), 12);
}

#[test]
fn test_engine_rejects_invalid_config() {
    let config: Config = toml::from_str(
        r#"
        [pricing]
        base_decay_rate = 0
        "#,
    )
    .unwrap();

    assert!(Engine::new(config).is_err());
}
