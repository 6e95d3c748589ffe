//! Error types for store and trigger operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::key::{JobKey, TriggerKey};

/// Errors produced while validating jobs, triggers, and their time windows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A key was built with an empty name.
    #[error("key name cannot be empty")]
    EmptyName,
    /// A key group contains the `.` separator, so its string form would be ambiguous.
    #[error("key group '{0}' cannot contain '.'")]
    DottedGroup(String),
    /// A trigger was built without a start time.
    #[error("start time cannot be absent")]
    MissingStartTime,
    /// A trigger was built without naming the job it fires.
    #[error("trigger must reference a job")]
    MissingJobKey,
    /// The validity window ends before it starts.
    #[error("end time {end} cannot be before start time {start}")]
    EndBeforeStart {
        /// Window start.
        start: DateTime<Utc>,
        /// Rejected window end.
        end: DateTime<Utc>,
    },
    /// A repeating schedule with an interval below one millisecond.
    #[error("repeat interval must be at least one millisecond")]
    RepeatIntervalTooSmall,
}

/// Errors produced by job store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A job with the same key is already stored.
    #[error("unable to store job '{0}': one already exists with this identification")]
    JobAlreadyExists(JobKey),
    /// A trigger with the same key is already stored.
    #[error(
        "unable to store trigger with name '{}' and group '{}': one already exists with this identification",
        .0.name(),
        .0.group()
    )]
    TriggerAlreadyExists(TriggerKey),
    /// The job referenced by a trigger is not stored.
    #[error("the job ({0}) referenced by the trigger does not exist")]
    JobPersistence(JobKey),
    /// A replacement trigger points at a different job than the trigger it replaces.
    #[error("trigger {trigger} must reference job {expected}, not {actual}")]
    TriggerJobMismatch {
        /// Key of the trigger being replaced.
        trigger: TriggerKey,
        /// Job of the trigger being replaced.
        expected: JobKey,
        /// Job of the replacement.
        actual: JobKey,
    },
    /// Invalid job or trigger definition.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
