//! Drives the crate the way a configuration loader would: rates embedded
//! in structured documents, flat strings from the environment, defaulting
//! and normalization before handing the figure to a limiter.

use std::time::Duration;

use eventrate::Rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ThrottleConfig {
    name: String,
    limit: Rate,
}

#[test]
fn test_json_config_document() {
    let config: ThrottleConfig = serde_json::from_str(
        r#"{
            "name": "api-writes",
            "limit": { "events": 100.0, "over_time": 3600000000000 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.name, "api-writes");
    assert_eq!(config.limit, Rate::new(100.0, Duration::from_secs(3600)));
    assert!((config.limit.events_per_second() - 100.0 / 3600.0).abs() < 1e-12);
}

#[test]
fn test_json_config_omits_unset_rate() {
    let config: ThrottleConfig = serde_json::from_str(r#"{ "name": "bulk" }"#).unwrap();
    assert_eq!(config.limit, Rate::default());

    let encoded = serde_json::to_value(&config).unwrap();
    assert_eq!(encoded, serde_json::json!({ "name": "bulk", "limit": {} }));
}

#[test]
fn test_toml_config_document() {
    let config: ThrottleConfig = toml::from_str(
        r#"
            name = "ingest"

            [limit]
            events = 500.0
            over_time = 60000000000
        "#,
    )
    .unwrap();

    assert_eq!(config.limit, Rate::new(500.0, Duration::from_secs(60)));

    let encoded = toml::to_string(&config).unwrap();
    let decoded: ThrottleConfig = toml::from_str(&encoded).unwrap();
    assert_eq!(decoded, config);
}

#[test]
fn test_flat_string_with_normalization() {
    // A bare per-second figure from an environment variable, normalized
    // before use. The supplied default is ignored; an unset time base
    // always becomes one hour.
    let limit: Rate = "250".parse().unwrap();
    let limit = limit.default_over_time(Duration::from_secs(60));
    assert_eq!(limit.over_time, Duration::from_secs(3600));
    assert_eq!(limit.events, 250.0);

    // An explicit time base survives normalization untouched.
    let limit: Rate = "250/30s".parse().unwrap();
    let normalized = limit.default_over_time(Duration::from_secs(60));
    assert_eq!(normalized, limit);
}

#[test]
fn test_flat_string_diagnostics() {
    let err = "100/".parse::<Rate>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "over-time part of rate value \"100/\" failed to parse: empty duration string"
    );

    let err = "twenty/1h".parse::<Rate>().unwrap_err();
    assert!(err.to_string().starts_with("events part of rate value"));
}

#[test]
fn test_display_for_logging() {
    let limit: Rate = "100/1h".parse().unwrap();
    assert_eq!(limit.to_string(), "100/1h0m0s");

    let limit: Rate = "12.5".parse().unwrap();
    assert_eq!(limit.to_string(), "12.500000");
}
