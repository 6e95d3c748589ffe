//! Job configuration and construction.

use rand::Rng;

use crate::core::{DataValue, JobDataMap, JobDetail, JobKey, ValidationError, DEFAULT_GROUP};

/// Immutable description of a job. Every `with_*` call returns a new value;
/// [`build`](Self::build) never mutates the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobConfig {
    key: Option<JobKey>,
    description: String,
    durable: bool,
    concurrent_execution_disallowed: bool,
    job_data: Option<JobDataMap>,
}

impl JobConfig {
    /// Empty configuration: generated key, non-durable, no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key in the default group.
    #[must_use]
    pub fn with_identity(self, name: impl Into<String>) -> Self {
        self.with_key(JobKey::new(name))
    }

    /// Key in an explicit group.
    #[must_use]
    pub fn with_group_identity(self, name: impl Into<String>, group: impl AsRef<str>) -> Self {
        self.with_key(JobKey::with_group(name, group))
    }

    /// Explicit key.
    #[must_use]
    pub fn with_key(mut self, key: JobKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the job outlives its last trigger.
    #[must_use]
    pub const fn with_durability(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    /// Whether the job blocks its other triggers while executing.
    #[must_use]
    pub const fn with_concurrent_execution_disallowed(mut self, disallowed: bool) -> Self {
        self.concurrent_execution_disallowed = disallowed;
        self
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
    pub const fn key(&self) -> Option<&JobKey> {
        self.key.as_ref()
    }

    /// Builds the job, generating a key in the default group when none is set.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] when the configured key has an empty name.
    pub fn build(&self) -> Result<JobDetail, ValidationError> {
        self.build_with(&mut rand::rng())
    }

    /// Like [`build`](Self::build), drawing generated names from `rng`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] when the configured key has an empty name.
    pub fn build_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<JobDetail, ValidationError> {
        let key = match &self.key {
            Some(key) => key.clone(),
            None => JobKey::unique_with(DEFAULT_GROUP, rng),
        };
        key.validate()?;

        let mut job = JobDetail::new(key);
        job.description.clone_from(&self.description);
        job.durable = self.durable;
        job.concurrent_execution_disallowed = self.concurrent_execution_disallowed;
        if let Some(data) = &self.job_data {
            job.job_data = data.clone();
        }
        Ok(job)
    }
}
