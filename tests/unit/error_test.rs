//! Tests for error types

use prometheus_job_store::core::{JobKey, StoreError, TriggerKey, ValidationError};

#[test]
fn test_job_already_exists_error() {
    let err = StoreError::JobAlreadyExists(JobKey::with_group("invoice", "billing"));
    assert_eq!(
        format!("{}", err),
        "unable to store job 'billing.invoice': one already exists with this identification"
    );
}

#[test]
fn test_trigger_already_exists_error() {
    let err = StoreError::TriggerAlreadyExists(TriggerKey::new("nightly"));
    assert_eq!(
        format!("{}", err),
        "unable to store trigger with name 'nightly' and group 'DEFAULT': one already exists with this identification"
    );
}

#[test]
fn test_job_persistence_error() {
    let err = StoreError::JobPersistence(JobKey::new("missing"));
    assert_eq!(
        format!("{}", err),
        "the job (DEFAULT.missing) referenced by the trigger does not exist"
    );
}

#[test]
fn test_trigger_job_mismatch_error() {
    let err = StoreError::TriggerJobMismatch {
        trigger: TriggerKey::new("t"),
        expected: JobKey::new("a"),
        actual: JobKey::new("b"),
    };
    assert_eq!(
        format!("{}", err),
        "trigger DEFAULT.t must reference job DEFAULT.a, not DEFAULT.b"
    );
}

#[test]
fn test_validation_errors() {
    assert_eq!(
        format!("{}", ValidationError::EmptyName),
        "key name cannot be empty"
    );
    assert_eq!(
        format!("{}", ValidationError::RepeatIntervalTooSmall),
        "repeat interval must be at least one millisecond"
    );
    let wrapped = StoreError::from(ValidationError::MissingJobKey);
    assert_eq!(
        format!("{}", wrapped),
        "validation failed: trigger must reference a job"
    );
}

#[test]
fn test_store_error_into_anyhow() {
    let err: anyhow::Error = StoreError::JobPersistence(JobKey::new("j")).into();
    assert!(err.downcast_ref::<StoreError>().is_some());
}
