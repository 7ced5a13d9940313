use smc::{IndicatorConfig, IndicatorProfileConfig};

#[test]
fn config_from_yaml_applies_partial_override() {
    let yaml = r#"
swing_length: 10
join_consecutive: true
"#;
    let config = IndicatorConfig::from_yaml_str(yaml).expect("yaml parse should succeed");
    assert_eq!(config.swing_length, 10);
    assert!(config.join_consecutive);
    assert_eq!(config.close_break, IndicatorConfig::default().close_break);
}

#[test]
fn defaults_match_documented_values() {
    let config = IndicatorConfig::default();
    assert_eq!(config.swing_length, 50);
    assert!(config.close_break);
    assert!(!config.join_consecutive);
    assert!(config.validate().is_ok());
}

#[test]
fn profile_resolve_layers_symbol_and_interval_overrides() {
    let yaml = r#"
default:
    swing_length: 30
interval:
    1h:
        join_consecutive: true
symbol:
    BTCUSDT:
        swing_length: 20
symbol_interval:
    "*.1h":
        close_break: false
    "ethusdt.*":
        swing_length: 15
    "BTCUSDT.1h":
        swing_length: 8
"#;
    let profile = IndicatorProfileConfig::from_yaml_str(yaml).expect("yaml should parse");

    let btc_hourly = profile.resolve_for("btcusdt", "1h");
    assert_eq!(btc_hourly.swing_length, 8);
    assert!(btc_hourly.join_consecutive);
    assert!(!btc_hourly.close_break);

    let btc_daily = profile.resolve_for("BTCUSDT", "1d");
    assert_eq!(btc_daily.swing_length, 20);
    assert!(!btc_daily.join_consecutive);
    assert!(btc_daily.close_break);

    let eth_hourly = profile.resolve_for("ETHUSDT", "1h");
    assert_eq!(eth_hourly.swing_length, 15);

    let other = profile.resolve_for("SOLUSDT", "5m");
    assert_eq!(other.swing_length, 30);
}

#[test]
fn minute_and_month_intervals_stay_distinct() {
    let yaml = r#"
interval:
    1m:
        swing_length: 5
    1M:
        swing_length: 3
"#;
    let profile = IndicatorProfileConfig::from_yaml_str(yaml).expect("yaml should parse");
    assert_eq!(profile.resolve_for("BTCUSDT", "1m").swing_length, 5);
    assert_eq!(profile.resolve_for("BTCUSDT", "1M").swing_length, 3);
}

#[test]
fn digit_leading_symbols_match_case_insensitively() {
    let yaml = r#"
symbol:
    1inchusdt:
        swing_length: 7
symbol_interval:
    "1INCHUSDT.1M":
        join_consecutive: true
"#;
    let profile = IndicatorProfileConfig::from_yaml_str(yaml).expect("yaml should parse");

    assert_eq!(profile.resolve_for("1inchusdt", "1h").swing_length, 7);
    assert_eq!(profile.resolve_for("1INCHUSDT", "1h").swing_length, 7);
    assert_eq!(profile.resolve_for(" 1InchUsdt ", "1h").swing_length, 7);

    assert!(profile.resolve_for("1inchusdt", "1M").join_consecutive);
    assert!(!profile.resolve_for("1INCHUSDT", "1m").join_consecutive);
}

#[test]
fn profile_loads_json_files() {
    let path = std::env::temp_dir().join(format!("smc_profile_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"default": {"swing_length": 12}}"#).expect("write profile");

    let profile = IndicatorProfileConfig::from_file(&path).expect("json profile");
    assert_eq!(profile.resolve_for("BTCUSDT", "15m").swing_length, 12);

    let _ = std::fs::remove_file(path);
}
