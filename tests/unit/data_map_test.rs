//! Tests for the dirty-flag data map

use std::collections::BTreeMap;

use prometheus_job_store::core::{DataValue, JobDataMap};

#[test]
fn test_enumeration_is_key_ordered() {
    let mut map = JobDataMap::new();
    map.put("zeta", 1);
    map.put("alpha", "a");
    map.put("mid", true);

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["alpha", "mid", "zeta"]);
    assert_eq!(
        map.values().cloned().collect::<Vec<_>>(),
        vec![DataValue::from("a"), DataValue::from(true), DataValue::from(1)]
    );
    assert_eq!(map.iter().count(), 3);
}

#[test]
fn test_contains_and_accessors() {
    let mut map = JobDataMap::new();
    map.put("count", 42_i64);
    map.put("enabled", false);

    assert!(map.contains("count"));
    assert!(!map.contains("missing"));
    assert_eq!(map.get("count").and_then(DataValue::as_i64), Some(42));
    assert_eq!(map.get("enabled").and_then(DataValue::as_bool), Some(false));
    assert_eq!(map.get("count").and_then(DataValue::as_str), None);
}

#[test]
fn test_nested_values() {
    let mut inner = BTreeMap::new();
    inner.insert("region".to_string(), DataValue::from("eu"));

    let mut map = JobDataMap::new();
    map.put("target", inner.clone());
    map.put("payload", vec![1_u8, 2, 3]);

    assert_eq!(map.get("target"), Some(&DataValue::Map(inner)));
    assert_eq!(map.get("payload"), Some(&DataValue::Bytes(vec![1, 2, 3])));
}

#[test]
fn test_serialized_form_is_tagged() {
    let mut map = JobDataMap::new();
    map.put("ratio", 0.5);
    map.clear_dirty_flag();

    let json = serde_json::to_value(&map).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "entries": {"ratio": {"type": "float", "value": 0.5}},
            "dirty": false
        })
    );
    let back: JobDataMap = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, map);
}
