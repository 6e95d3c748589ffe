//! Trigger and schedule configuration.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::core::{
    DataValue, JobDataMap, JobDetail, JobKey, RepeatCount, Schedule, SimpleSchedule, Trigger,
    TriggerKey, ValidationError, DEFAULT_GROUP,
};
use crate::util::clock;

/// Fixed-interval schedule settings. Defaults to a single fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleScheduleConfig {
    interval: TimeDelta,
    repeat_count: RepeatCount,
}

impl SimpleScheduleConfig {
    /// Fire-once schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time between fires.
    #[must_use]
    pub const fn with_interval(mut self, interval: TimeDelta) -> Self {
        self.interval = interval;
        self
    }

    /// Time between fires, in whole seconds.
    #[must_use]
    pub fn with_interval_in_seconds(self, seconds: i64) -> Self {
        self.with_interval(TimeDelta::try_seconds(seconds).unwrap_or(TimeDelta::MAX))
    }

    /// Time between fires, in milliseconds.
    #[must_use]
    pub fn with_interval_in_millis(self, millis: i64) -> Self {
        self.with_interval(TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX))
    }

    /// Number of repeats after the first fire.
    #[must_use]
    pub const fn with_repeat_count(mut self, repeat_count: RepeatCount) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Repeat until the trigger's end time, if any.
    #[must_use]
    pub const fn repeat_forever(self) -> Self {
        self.with_repeat_count(RepeatCount::Indefinitely)
    }

    /// Configured interval.
    #[must_use]
    pub const fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// Configured repeat count.
    #[must_use]
    pub const fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    /// Builds the schedule strategy.
    ///
    /// # Errors
    ///
    /// [`ValidationError::RepeatIntervalTooSmall`] for a repeating schedule with an
    /// interval below one millisecond.
    pub fn build(&self) -> Result<Schedule, ValidationError> {
        let schedule = SimpleSchedule::new(self.interval, self.repeat_count);
        schedule.validate()?;
        Ok(Schedule::Simple(schedule))
    }
}

/// Immutable description of a trigger. Each field set later overrides the
/// one set earlier; [`build`](Self::build) never mutates the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerConfig {
    key: Option<TriggerKey>,
    job_key: Option<JobKey>,
    description: String,
    priority: i32,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    schedule: SimpleScheduleConfig,
    job_data: Option<JobDataMap>,
}

impl TriggerConfig {
    /// Empty configuration: generated key, fire-once schedule, no start time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key in the default group.
    #[must_use]
    pub fn with_identity(self, name: impl Into<String>) -> Self {
        self.with_key(TriggerKey::new(name))
    }

    /// Key in an explicit group.
    #[must_use]
    pub fn with_group_identity(self, name: impl Into<String>, group: impl AsRef<str>) -> Self {
        self.with_key(TriggerKey::with_group(name, group))
    }

    /// Explicit key.
    #[must_use]
    pub fn with_key(mut self, key: TriggerKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Priority; higher fires first among triggers due together.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Start of the validity window.
    #[must_use]
    pub const fn start_at(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Starts the validity window at the current instant.
    #[must_use]
    pub fn start_now(self) -> Self {
        self.start_at(clock::now())
    }

    /// End of the validity window.
    #[must_use]
    pub const fn end_at(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Schedule settings.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: SimpleScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Fires the job `name` in the default group.
    #[must_use]
    pub fn for_job(self, name: impl Into<String>) -> Self {
        self.for_job_key(JobKey::new(name))
    }

    /// Fires the job `name` in `group`.
    #[must_use]
    pub fn for_group_job(self, name: impl Into<String>, group: impl AsRef<str>) -> Self {
        self.for_job_key(JobKey::with_group(name, group))
    }

    /// Fires the job stored under `key`.
    #[must_use]
    pub fn for_job_key(mut self, key: JobKey) -> Self {
        self.job_key = Some(key);
        self
    }

    /// Fires `job`.
    #[must_use]
    pub fn for_job_detail(self, job: &JobDetail) -> Self {
        self.for_job_key(job.key().clone())
    }

    /// Adds one data entry.
    #[must_use]
    pub fn using_job_data(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.job_data.get_or_insert_with(JobDataMap::new).put(key, value);
        self
    }

    /// Merges entries into the data payload.
    #[must_use]
    pub fn using_job_data_map(mut self, data: &JobDataMap) -> Self {
        self.job_data.get_or_insert_with(JobDataMap::new).put_all(data);
        self
    }

    /// Replaces the data payload.
    #[must_use]
    pub fn with_job_data_map(mut self, data: JobDataMap) -> Self {
        self.job_data = Some(data);
        self
    }

    /// Configured key, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&TriggerKey> {
        self.key.as_ref()
    }

    /// Configured job key, if any.
    #[must_use]
    pub const fn job_key(&self) -> Option<&JobKey> {
        self.job_key.as_ref()
    }

    /// Configured schedule settings.
    #[must_use]
    pub const fn schedule(&self) -> &SimpleScheduleConfig {
        &self.schedule
    }

    /// Builds the trigger, generating a key in the default group when none is set.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingStartTime`], [`ValidationError::MissingJobKey`],
    /// [`ValidationError::EndBeforeStart`], [`ValidationError::EmptyName`] or
    /// [`ValidationError::RepeatIntervalTooSmall`].
    pub fn build(&self) -> Result<Trigger, ValidationError> {
        self.build_with(&mut rand::rng())
    }

    /// Like [`build`](Self::build), drawing generated names from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Trigger, ValidationError> {
        let start = self.start_time.ok_or(ValidationError::MissingStartTime)?;
        let job_key = self.job_key.clone().ok_or(ValidationError::MissingJobKey)?;
        let schedule = self.schedule.build()?;
        let key = match &self.key {
            Some(key) => key.clone(),
            None => TriggerKey::unique_with(DEFAULT_GROUP, rng),
        };

        let mut trigger = Trigger::new(key, job_key, start, schedule);
        trigger.set_end_time(self.end_time)?;
        trigger.set_description(self.description.clone());
        trigger.set_priority(self.priority);
        if let Some(data) = &self.job_data {
            trigger.set_job_data(data.clone());
        }
        trigger.validate()?;
        Ok(trigger)
    }
}
