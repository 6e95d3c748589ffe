//! Trigger timing model.
//!
//! A [`Trigger`] carries identity, the job it fires, a validity window and
//! fire-time bookkeeping. The [`Schedule`] it holds decides when it fires;
//! [`SimpleSchedule`] repeats at a fixed interval a bounded or unbounded
//! number of times.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::builders::{SimpleScheduleConfig, TriggerConfig};
use crate::core::data_map::JobDataMap;
use crate::core::error::ValidationError;
use crate::core::key::{JobKey, TriggerKey};
use crate::util::clock;

/// How many times a [`SimpleSchedule`] repeats after its first fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    /// Repeat this many times; `Finite(0)` fires exactly once.
    Finite(u32),
    /// Repeat until the end time, if any.
    Indefinitely,
}

impl RepeatCount {
    fn exceeded_by(self, count: i64) -> bool {
        match self {
            Self::Finite(limit) => count > i64::from(limit),
            Self::Indefinitely => false,
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::Finite(0)
    }
}

mod interval_ms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        TimeDelta::try_milliseconds(ms)
            .ok_or_else(|| serde::de::Error::custom("repeat interval out of range"))
    }
}

/// Whole `interval`s contained in `elapsed`, rounded down.
fn intervals_in(elapsed: TimeDelta, interval: TimeDelta) -> i64 {
    match (elapsed.num_nanoseconds(), interval.num_nanoseconds()) {
        (Some(e), Some(i)) if i > 0 => e.div_euclid(i),
        _ => elapsed.num_milliseconds().div_euclid(interval.num_milliseconds().max(1)),
    }
}

/// `start + n * interval`, or `None` once the result leaves chrono's range.
///
/// Offsets too large for nanoseconds are computed in milliseconds.
fn nth_fire(start: DateTime<Utc>, interval: TimeDelta, n: i64) -> Option<DateTime<Utc>> {
    let offset = match interval.num_nanoseconds().and_then(|ns| ns.checked_mul(n)) {
        Some(ns) => TimeDelta::nanoseconds(ns),
        None => TimeDelta::try_milliseconds(interval.num_milliseconds().checked_mul(n)?)?,
    };
    start.checked_add_signed(offset)
}

fn below_resolution(interval: TimeDelta) -> bool {
    interval < TimeDelta::milliseconds(1)
}

/// Fixed-interval repeating schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSchedule {
    #[serde(with = "interval_ms")]
    repeat_interval: TimeDelta,
    repeat_count: RepeatCount,
    times_triggered: u32,
    complete: bool,
}

impl SimpleSchedule {
    /// Creates a schedule that has not fired yet.
    #[must_use]
    pub const fn new(repeat_interval: TimeDelta, repeat_count: RepeatCount) -> Self {
        Self {
            repeat_interval,
            repeat_count,
            times_triggered: 0,
            complete: false,
        }
    }

    /// Time between fires.
    #[must_use]
    pub const fn repeat_interval(&self) -> TimeDelta {
        self.repeat_interval
    }

    /// Repeats after the first fire.
    #[must_use]
    pub const fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    /// Fires recorded so far.
    #[must_use]
    pub const fn times_triggered(&self) -> u32 {
        self.times_triggered
    }

    /// Overrides the fire counter.
    pub fn set_times_triggered(&mut self, times_triggered: u32) {
        self.times_triggered = times_triggered;
    }

    /// Whether the schedule was marked as finished.
    #[must_use]
    pub const fn complete(&self) -> bool {
        self.complete
    }

    /// Marks the schedule finished; it will not produce further fire times.
    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    /// Rejects repeating schedules whose interval cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RepeatIntervalTooSmall`] when the schedule repeats
    /// with an interval below one millisecond.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.repeat_count != RepeatCount::Finite(0) && below_resolution(self.repeat_interval) {
            return Err(ValidationError::RepeatIntervalTooSmall);
        }
        Ok(())
    }

    fn fire_time_after(
        &self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        after: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        if self.complete || self.repeat_count.exceeded_by(i64::from(self.times_triggered)) {
            return None;
        }
        if self.repeat_count == RepeatCount::Finite(0) && after > start {
            return None;
        }
        if end.is_some_and(|end| end < after) {
            return None;
        }
        if after < start {
            return Some(start);
        }
        if below_resolution(self.repeat_interval) {
            return None;
        }

        let n = intervals_in(after - start, self.repeat_interval) + 1;
        if self.repeat_count.exceeded_by(n) {
            return None;
        }
        let fire_time = nth_fire(start, self.repeat_interval, n)?;
        if end.is_some_and(|end| end < fire_time) {
            return None;
        }
        Some(fire_time)
    }

    fn fire_time_before(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if end < start {
            return None;
        }
        let fires = if below_resolution(self.repeat_interval) {
            0
        } else {
            intervals_in(end - start, self.repeat_interval)
        };
        nth_fire(start, self.repeat_interval, fires)
    }

    fn final_fire_time(
        &self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        match self.repeat_count {
            RepeatCount::Finite(0) => Some(start),
            RepeatCount::Indefinitely => end.and_then(|end| self.fire_time_before(start, end)),
            RepeatCount::Finite(count) => {
                let last = nth_fire(start, self.repeat_interval, i64::from(count));
                match (last, end) {
                    (Some(last), None) => Some(last),
                    (Some(last), Some(end)) if last < end => Some(last),
                    (_, Some(end)) => self.fire_time_before(start, end),
                    (None, None) => None,
                }
            }
        }
    }
}

/// Schedule strategy held by a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Schedule {
    /// Fixed-interval repetition.
    Simple(SimpleSchedule),
}

impl Schedule {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Simple(s) => s.validate(),
        }
    }

    fn record_fire(&mut self) {
        match self {
            Self::Simple(s) => s.times_triggered = s.times_triggered.saturating_add(1),
        }
    }
}

/// A schedulable firing rule bound to exactly one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    key: TriggerKey,
    job_key: JobKey,
    description: String,
    priority: i32,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    next_fire_time: Option<DateTime<Utc>>,
    previous_fire_time: Option<DateTime<Utc>>,
    job_data: JobDataMap,
    schedule: Schedule,
}

impl Trigger {
    /// Creates a trigger with no end time, no data, and priority zero.
    #[must_use]
    pub fn new(
        key: TriggerKey,
        job_key: JobKey,
        start_time: DateTime<Utc>,
        schedule: Schedule,
    ) -> Self {
        Self {
            key,
            job_key,
            description: String::new(),
            priority: 0,
            start_time,
            end_time: None,
            next_fire_time: None,
            previous_fire_time: None,
            job_data: JobDataMap::new(),
            schedule,
        }
    }

    /// Trigger identity.
    #[must_use]
    pub const fn key(&self) -> &TriggerKey {
        &self.key
    }

    /// Job fired by this trigger.
    #[must_use]
    pub const fn job_key(&self) -> &JobKey {
        &self.job_key
    }

    /// Rebinds the trigger to another job.
    pub fn set_job_key(&mut self, job_key: JobKey) {
        self.job_key = job_key;
    }

    /// Human readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Tie-breaker between triggers due at the same instant; higher fires first.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Sets the priority.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Start of the validity window.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Moves the start of the validity window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EndBeforeStart`] if the end time precedes `start_time`.
    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(end) = self.end_time {
            if end < start_time {
                return Err(ValidationError::EndBeforeStart { start: start_time, end });
            }
        }
        self.start_time = start_time;
        Ok(())
    }

    /// End of the validity window, if bounded.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Sets or clears the end of the validity window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EndBeforeStart`] if `end_time` precedes the start time.
    pub fn set_end_time(&mut self, end_time: Option<DateTime<Utc>>) -> Result<(), ValidationError> {
        if let Some(end) = end_time {
            if end < self.start_time {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_time,
                    end,
                });
            }
        }
        self.end_time = end_time;
        Ok(())
    }

    /// Next scheduled fire, if any.
    #[must_use]
    pub const fn next_fire_time(&self) -> Option<DateTime<Utc>> {
        self.next_fire_time
    }

    /// Stores the next fire time computed by the scheduler.
    pub fn set_next_fire_time(&mut self, next_fire_time: Option<DateTime<Utc>>) {
        self.next_fire_time = next_fire_time;
    }

    /// Last fire, if any.
    #[must_use]
    pub const fn previous_fire_time(&self) -> Option<DateTime<Utc>> {
        self.previous_fire_time
    }

    /// Stores the last fire time.
    pub fn set_previous_fire_time(&mut self, previous_fire_time: Option<DateTime<Utc>>) {
        self.previous_fire_time = previous_fire_time;
    }

    /// Data payload.
    #[must_use]
    pub const fn job_data(&self) -> &JobDataMap {
        &self.job_data
    }

    /// Mutable data payload of this copy.
    pub fn job_data_mut(&mut self) -> &mut JobDataMap {
        &mut self.job_data
    }

    /// Replaces the data payload.
    pub fn set_job_data(&mut self, job_data: JobDataMap) {
        self.job_data = job_data;
    }

    /// Schedule strategy.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Mutable schedule strategy.
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// Checks everything a store needs before accepting the trigger.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: empty key names, an end time
    /// before the start time, or an unresolvable repeat interval.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.key.validate()?;
        self.job_key.validate()?;
        if let Some(end) = self.end_time {
            if end < self.start_time {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_time,
                    end,
                });
            }
        }
        self.schedule.validate()
    }

    /// Earliest fire time at or after `after` (absent means now), or `None`
    /// when the trigger will not fire again.
    #[must_use]
    pub fn fire_time_after(&self, after: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let after = after.unwrap_or_else(clock::now);
        match &self.schedule {
            Schedule::Simple(s) => s.fire_time_after(self.start_time, self.end_time, after),
        }
    }

    /// Latest fire time at or before `end`, or `None` when `end` precedes the start.
    #[must_use]
    pub fn fire_time_before(&self, end: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match &self.schedule {
            Schedule::Simple(s) => s.fire_time_before(self.start_time, end),
        }
    }

    /// Last fire time the schedule will ever produce, or `None` if unbounded.
    #[must_use]
    pub fn final_fire_time(&self) -> Option<DateTime<Utc>> {
        match &self.schedule {
            Schedule::Simple(s) => s.final_fire_time(self.start_time, self.end_time),
        }
    }

    /// Whether a next fire time is currently recorded.
    #[must_use]
    pub const fn may_fire_again(&self) -> bool {
        self.next_fire_time.is_some()
    }

    /// Seeds the bookkeeping before the trigger is first scheduled.
    pub fn compute_first_fire_time(&mut self) -> Option<DateTime<Utc>> {
        self.next_fire_time = Some(self.start_time);
        self.next_fire_time
    }

    /// Records a fire and advances `next_fire_time` past it.
    ///
    /// Does nothing while no fire is pending, so an unseeded trigger must go
    /// through [`Trigger::compute_first_fire_time`] first.
    pub fn triggered(&mut self) {
        if self.next_fire_time.is_none() {
            return;
        }
        self.schedule.record_fire();
        self.previous_fire_time = self.next_fire_time;
        self.next_fire_time = self.fire_time_after(self.next_fire_time);
    }

    /// Configuration that rebuilds an equivalent trigger.
    #[must_use]
    pub fn trigger_config(&self) -> TriggerConfig {
        let config = TriggerConfig::new()
            .with_key(self.key.clone())
            .with_description(self.description.clone())
            .with_priority(self.priority)
            .start_at(self.start_time)
            .for_job_key(self.job_key.clone())
            .with_job_data_map(self.job_data.clone())
            .with_schedule(self.schedule_config());
        match self.end_time {
            Some(end) => config.end_at(end),
            None => config,
        }
    }

    /// Schedule configuration that rebuilds this trigger's strategy.
    #[must_use]
    pub fn schedule_config(&self) -> SimpleScheduleConfig {
        match &self.schedule {
            Schedule::Simple(s) => SimpleScheduleConfig::new()
                .with_interval(s.repeat_interval)
                .with_repeat_count(s.repeat_count),
        }
    }
}
