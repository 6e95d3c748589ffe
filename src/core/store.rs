//! Storage abstraction consumed by the scheduler's dispatch loop.

use chrono::{DateTime, Utc};

use crate::core::error::StoreError;
use crate::core::job::JobDetail;
use crate::core::key::{JobKey, TriggerKey};
use crate::core::state::TriggerState;
use crate::core::trigger::Trigger;

/// Repository of jobs and triggers.
///
/// Every call is atomic on its own. Composing two calls (check, then store)
/// is not; rely on the store's own existence checks instead. Values returned
/// are independent copies of what the store holds.
pub trait JobStore: Send + Sync {
    /// Hook invoked when the scheduler starts.
    ///
    /// # Errors
    ///
    /// Backends that need to recover state may fail here.
    fn scheduler_started(&self) -> Result<(), StoreError>;

    /// Hook invoked when the scheduler enters standby.
    fn scheduler_paused(&self);

    /// Hook invoked when the scheduler leaves standby.
    fn scheduler_resumed(&self);

    /// Hook invoked when the scheduler shuts down.
    fn shutdown(&self);

    /// Whether stored data survives a restart.
    fn supports_persistence(&self) -> bool;

    /// Whether the store is shared between scheduler instances.
    fn clustered(&self) -> bool;

    /// Stores a new job together with a new trigger.
    ///
    /// # Errors
    ///
    /// Fails when either key already exists, the trigger references a job that is
    /// neither `job` nor stored, or either definition is invalid.
    fn store_job_and_trigger(&self, job: JobDetail, trigger: Trigger) -> Result<(), StoreError>;

    /// Stores a batch of jobs with their triggers.
    ///
    /// # Errors
    ///
    /// Without `replace`, fails if any job or trigger of the batch already exists.
    /// Also fails on triggers referencing unknown jobs or invalid definitions.
    fn store_jobs_and_triggers(
        &self,
        batch: Vec<(JobDetail, Vec<Trigger>)>,
        replace: bool,
    ) -> Result<(), StoreError>;

    /// Inserts a job, or overwrites it in place when `replace_existing` is set.
    ///
    /// # Errors
    ///
    /// [`StoreError::JobAlreadyExists`] on a collision without replace.
    fn store_job(&self, job: JobDetail, replace_existing: bool) -> Result<(), StoreError>;

    /// Removes a job and all of its triggers. Returns whether it was found.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn remove_job(&self, key: &JobKey) -> Result<bool, StoreError>;

    /// Removes several jobs. Returns whether all of them were found.
    ///
    /// # Errors
    ///
    /// The first backend failure; earlier removals are kept.
    fn remove_jobs(&self, keys: &[JobKey]) -> Result<bool, StoreError>;

    /// Copy of a stored job.
    fn retrieve_job(&self, key: &JobKey) -> Option<JobDetail>;

    /// Inserts a trigger, or replaces it when `replace_existing` is set.
    ///
    /// # Errors
    ///
    /// [`StoreError::TriggerAlreadyExists`] on a collision without replace,
    /// [`StoreError::JobPersistence`] when the referenced job is not stored.
    fn store_trigger(&self, trigger: Trigger, replace_existing: bool) -> Result<(), StoreError>;

    /// Removes a trigger; a non-durable job left without triggers goes with it.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn remove_trigger(&self, key: &TriggerKey) -> Result<bool, StoreError>;

    /// Removes several triggers. Returns whether all of them were found.
    ///
    /// # Errors
    ///
    /// The first backend failure; earlier removals are kept.
    fn remove_triggers(&self, keys: &[TriggerKey]) -> Result<bool, StoreError>;

    /// Swaps the trigger stored under `key` for `trigger`. Returns `false`, storing
    /// nothing, when no trigger is stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::TriggerJobMismatch`] when `trigger` fires a different job.
    fn replace_trigger(&self, key: &TriggerKey, trigger: Trigger) -> Result<bool, StoreError>;

    /// Copy of a stored trigger.
    fn retrieve_trigger(&self, key: &TriggerKey) -> Option<Trigger>;

    /// Whether a job is stored under `key`.
    fn check_job_exists(&self, key: &JobKey) -> bool;

    /// Whether a trigger is stored under `key`.
    fn check_trigger_exists(&self, key: &TriggerKey) -> bool;

    /// Number of stored jobs.
    fn number_of_jobs(&self) -> usize;

    /// Number of stored triggers.
    fn number_of_triggers(&self) -> usize;

    /// Copies of every trigger of a job.
    fn triggers_for_job(&self, key: &JobKey) -> Vec<Trigger>;

    /// Names of groups holding at least one job.
    fn job_group_names(&self) -> Vec<String>;

    /// Names of groups holding at least one trigger.
    fn trigger_group_names(&self) -> Vec<String>;

    /// Keys of the jobs in `group`.
    fn job_keys(&self, group: &str) -> Vec<JobKey>;

    /// Keys of the triggers in `group`.
    fn trigger_keys(&self, group: &str) -> Vec<TriggerKey>;

    /// Current state of a trigger.
    fn trigger_state(&self, key: &TriggerKey) -> Option<TriggerState>;

    /// Records a state reported by the dispatch loop. Returns whether the trigger exists.
    fn set_trigger_state(&self, key: &TriggerKey, state: TriggerState) -> bool;

    /// Pauses one trigger.
    fn pause_trigger(&self, key: &TriggerKey);

    /// Pauses a trigger group, including triggers stored into it later.
    fn pause_trigger_group(&self, group: &str);

    /// Pauses every trigger of a job.
    fn pause_job(&self, key: &JobKey);

    /// Pauses a job group, including jobs stored into it later.
    fn pause_job_group(&self, group: &str);

    /// Resumes one trigger.
    fn resume_trigger(&self, key: &TriggerKey);

    /// Resumes a trigger group.
    fn resume_trigger_group(&self, group: &str);

    /// Resumes every trigger of a job.
    fn resume_job(&self, key: &JobKey);

    /// Resumes a job group.
    fn resume_job_group(&self, group: &str);

    /// Pauses every trigger group.
    fn pause_all(&self);

    /// Resumes every paused group.
    fn resume_all(&self);

    /// Names of the paused trigger groups.
    fn paused_trigger_groups(&self) -> Vec<String>;

    /// Marks a job as executing exclusively, holding back its triggers.
    fn block_job(&self, key: &JobKey);

    /// Releases a job marked by [`block_job`](Self::block_job).
    fn unblock_job(&self, key: &JobKey);

    /// Waiting triggers due no later than `no_later_than`, in index order.
    fn next_due_triggers(&self, no_later_than: DateTime<Utc>, max_count: usize) -> Vec<Trigger>;

    /// Removes every job, trigger, pause and block.
    fn clear(&self);
}
