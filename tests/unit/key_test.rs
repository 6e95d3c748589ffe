//! Tests for identity keys

use prometheus_job_store::core::{unique_name, JobKey, TriggerKey, ValidationError, DEFAULT_GROUP};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_key_round_trip() {
    for (name, group) in [("name", "group"), ("a", "b"), ("with space", "g-1")] {
        let key = JobKey::with_group(name, group);
        assert_eq!(key.name(), name);
        assert_eq!(key.group(), group);
        assert_eq!(key.to_string(), format!("{group}.{name}"));
    }
}

#[test]
fn test_empty_group_means_default() {
    let key = TriggerKey::with_group("t", "");
    assert_eq!(key.group(), DEFAULT_GROUP);
    assert_eq!(key, TriggerKey::new("t"));
}

#[test]
fn test_parse_and_display_agree() {
    let key = TriggerKey::with_group("nightly", "reports");
    let parsed: TriggerKey = key.to_string().parse().expect("parse");
    assert_eq!(parsed, key);
    assert_eq!("".parse::<JobKey>(), Err(ValidationError::EmptyName));
}

#[test]
fn test_unique_name_layout() {
    let mut rng = StdRng::seed_from_u64(1);
    let name = unique_name("DEFAULT", &mut rng);
    assert_eq!(name.len(), 41);
    assert_eq!(name.as_bytes()[8], b'-');
    assert!(name
        .chars()
        .filter(|c| *c != '-')
        .all(|c| c.is_ascii_hexdigit()));

    let other_group = unique_name("other", &mut StdRng::seed_from_u64(1));
    assert_ne!(&name[..8], &other_group[..8]);
    assert_eq!(&name[9..], &other_group[9..]);
}

#[test]
fn test_keys_serialize_as_group_and_name() {
    let key = JobKey::with_group("invoice", "billing");
    let json = serde_json::to_value(&key).expect("serialize");
    assert_eq!(json, serde_json::json!({"group": "billing", "name": "invoice"}));
    let back: JobKey = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, key);
}

#[test]
fn test_dotted_names_round_trip_and_dotted_groups_are_rejected() {
    let key = TriggerKey::with_group("b.c", "a");
    let parsed: TriggerKey = key.to_string().parse().expect("parse");
    assert_eq!(parsed, key);
    assert_eq!(parsed.name(), "b.c");

    let dotted = TriggerKey::with_group("c", "a.b");
    assert_eq!(dotted.to_string(), key.to_string());
    assert_eq!(
        dotted.validate(),
        Err(ValidationError::DottedGroup("a.b".to_string()))
    );
}
