//! Tests for builder modules

use chrono::{TimeDelta, TimeZone, Utc};
use prometheus_job_store::builders::{JobConfig, SimpleScheduleConfig, TriggerConfig};
use prometheus_job_store::core::{JobDataMap, RepeatCount, Schedule, ValidationError};

#[test]
fn test_job_config_defaults() {
    let job = JobConfig::new().with_identity("cleanup").build().expect("job");
    assert!(!job.durable());
    assert!(!job.concurrent_execution_disallowed());
    assert!(job.job_data().is_empty());
    assert_eq!(job.description(), "");
}

#[test]
fn test_job_config_merges_data() {
    let mut extra = JobDataMap::new();
    extra.put("b", 2);
    extra.put("a", "override");

    let job = JobConfig::new()
        .with_identity("j")
        .using_job_data("a", 1)
        .using_job_data_map(&extra)
        .build()
        .expect("job");

    assert_eq!(job.job_data().len(), 2);
    assert_eq!(job.job_data().get("a").and_then(|v| v.as_str()), Some("override"));
}

#[test]
fn test_trigger_config_for_job_detail() {
    let job = JobConfig::new()
        .with_group_identity("report", "finance")
        .build()
        .expect("job");
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("start");

    let trigger = TriggerConfig::new()
        .with_group_identity("hourly", "finance")
        .for_job_detail(&job)
        .start_at(start)
        .with_schedule(
            SimpleScheduleConfig::new()
                .with_interval(TimeDelta::hours(1))
                .repeat_forever(),
        )
        .build()
        .expect("trigger");

    assert_eq!(trigger.job_key(), job.key());
    assert_eq!(trigger.start_time(), start);
    assert_eq!(trigger.end_time(), None);
    assert_eq!(trigger.next_fire_time(), None);
    let Schedule::Simple(schedule) = trigger.schedule() else {
        panic!("expected a simple schedule");
    };
    assert_eq!(schedule.repeat_interval(), TimeDelta::hours(1));
    assert_eq!(schedule.repeat_count(), RepeatCount::Indefinitely);
}

#[test]
fn test_trigger_config_start_now() {
    let before = Utc::now();
    let trigger = TriggerConfig::new()
        .for_job("j")
        .start_now()
        .build()
        .expect("trigger");
    assert!(trigger.start_time() >= before);
    assert!(trigger.start_time() <= Utc::now());
}

#[test]
fn test_schedule_config_validation() {
    let repeating = SimpleScheduleConfig::new().with_repeat_count(RepeatCount::Finite(3));
    assert_eq!(repeating.build(), Err(ValidationError::RepeatIntervalTooSmall));
    assert!(repeating.with_interval_in_millis(1).build().is_ok());
}
