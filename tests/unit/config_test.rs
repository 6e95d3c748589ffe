//! Tests for configuration validation

use std::collections::HashMap;

use prometheus_job_store::config::{
    IndexOrdering, StoreConfig, ENV_INDEX_ORDERING, ENV_STORE_NAME,
};

#[test]
fn test_store_config_defaults() {
    let config = StoreConfig::default();
    assert_eq!(config.name, "ram-job-store");
    assert_eq!(config.index_ordering, IndexOrdering::FireTime);
    assert!(config.validate().is_ok());
}

#[test]
fn test_store_config_invalid_name() {
    let invalid = StoreConfig {
        name: "  ".to_string(),
        ..StoreConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_store_config_from_json() {
    let config = StoreConfig::from_json_str(r#"{"name":"main","index_ordering":"key"}"#)
        .expect("valid config");
    assert_eq!(config.name, "main");
    assert_eq!(config.index_ordering, IndexOrdering::Key);

    let config = StoreConfig::from_json_str(r#"{"name":"main"}"#).expect("valid config");
    assert_eq!(config.index_ordering, IndexOrdering::FireTime);
}

#[test]
fn test_store_config_from_json_rejects_bad_input() {
    let err = StoreConfig::from_json_str("{").unwrap_err();
    assert!(err.starts_with("parse error"));

    let err = StoreConfig::from_json_str(r#"{"name":""}"#).unwrap_err();
    assert_eq!(err, "name must not be empty");
}

#[test]
fn test_store_config_from_lookup() {
    let vars: HashMap<&str, &str> =
        HashMap::from([(ENV_STORE_NAME, "worker-7"), (ENV_INDEX_ORDERING, "KEY")]);
    let config = StoreConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_string()))
        .expect("valid lookup");
    assert_eq!(config.name, "worker-7");
    assert_eq!(config.index_ordering, IndexOrdering::Key);
}

#[test]
fn test_store_config_from_lookup_unknown_ordering() {
    let err = StoreConfig::from_lookup(|name| {
        (name == ENV_INDEX_ORDERING).then(|| "random".to_string())
    })
    .unwrap_err();
    assert!(err.to_string().contains("unknown index ordering"));
}

#[test]
fn test_store_config_from_empty_lookup_keeps_defaults() {
    let config = StoreConfig::from_lookup(|_| None).expect("defaults");
    assert_eq!(config, StoreConfig::default());
}

#[test]
fn test_index_ordering_parse() {
    assert_eq!("fire_time".parse::<IndexOrdering>(), Ok(IndexOrdering::FireTime));
    assert_eq!(" key ".parse::<IndexOrdering>(), Ok(IndexOrdering::Key));
    assert!("priority".parse::<IndexOrdering>().is_err());
}
