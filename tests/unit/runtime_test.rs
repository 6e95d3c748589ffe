//! Tests for the tokio store adapter

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use prometheus_job_store::builders::{JobConfig, SimpleScheduleConfig, TriggerConfig};
use prometheus_job_store::core::{JobKey, JobStore, StoreError, TriggerKey};
use prometheus_job_store::infra::store::RamJobStore;
use prometheus_job_store::runtime::AsyncStoreHandle;

fn handle() -> AsyncStoreHandle<RamJobStore> {
    AsyncStoreHandle::current(Arc::new(RamJobStore::new()), Duration::from_secs(5))
        .expect("inside a runtime")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_store_round_trip() {
    let store = handle();
    let job = JobConfig::new().with_identity("j").build().expect("job");
    let mut trigger = TriggerConfig::new()
        .with_identity("t")
        .for_job("j")
        .start_at(Utc::now() - TimeDelta::seconds(1))
        .with_schedule(SimpleScheduleConfig::new().with_interval_in_seconds(10).repeat_forever())
        .build()
        .expect("trigger");
    trigger.compute_first_fire_time();

    store.store_job_and_trigger(job, trigger).await.expect("store");
    assert!(store.retrieve_job(JobKey::new("j")).await.expect("call").is_some());
    assert!(store.retrieve_trigger(TriggerKey::new("t")).await.expect("call").is_some());

    let due = store.next_due_triggers(Utc::now(), 10).await.expect("call");
    assert_eq!(due.len(), 1);

    assert!(store.remove_trigger(TriggerKey::new("t")).await.expect("call"));
    assert_eq!(store.store().number_of_jobs(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_store_surfaces_store_errors() {
    let store = handle();
    let job = JobConfig::new().with_identity("j").build().expect("job");
    store.store_job(job.clone(), false).await.expect("first");

    let err = store.store_job(job, false).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoreError>(),
        Some(&StoreError::JobAlreadyExists(JobKey::new("j")))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_store_times_out_but_completes() {
    let store = AsyncStoreHandle::current(Arc::new(RamJobStore::new()), Duration::from_millis(20))
        .expect("inside a runtime");
    assert_eq!(store.timeout(), Duration::from_millis(20));

    let err = store
        .run(|s| {
            std::thread::sleep(Duration::from_millis(200));
            let job = JobConfig::new().with_identity("slow").build().expect("job");
            s.store_job(job, false)
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("timed out"));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(store.store().check_job_exists(&JobKey::new("slow")));
}

#[test]
fn test_current_outside_runtime_fails() {
    let result = AsyncStoreHandle::current(Arc::new(RamJobStore::new()), Duration::from_secs(1));
    assert!(result.is_err());
}
