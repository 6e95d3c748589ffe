//! Job definitions.

use serde::{Deserialize, Serialize};

use crate::builders::JobConfig;
use crate::core::data_map::JobDataMap;
use crate::core::key::JobKey;

/// Detail properties of a job. Build one through [`JobConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub(crate) key: JobKey,
    pub(crate) description: String,
    pub(crate) durable: bool,
    pub(crate) concurrent_execution_disallowed: bool,
    pub(crate) job_data: JobDataMap,
}

impl JobDetail {
    /// Creates a non-durable job with no data.
    #[must_use]
    pub fn new(key: JobKey) -> Self {
        Self {
            key,
            description: String::new(),
            durable: false,
            concurrent_execution_disallowed: false,
            job_data: JobDataMap::new(),
        }
    }

    /// Job identity.
    #[must_use]
    pub const fn key(&self) -> &JobKey {
        &self.key
    }

    /// Human readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the job stays stored after its last trigger is removed.
    #[must_use]
    pub const fn durable(&self) -> bool {
        self.durable
    }

    /// Whether the job's triggers are held back while one of them executes.
    #[must_use]
    pub const fn concurrent_execution_disallowed(&self) -> bool {
        self.concurrent_execution_disallowed
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

    /// Configuration that rebuilds an equivalent job.
    #[must_use]
    pub fn job_config(&self) -> JobConfig {
        JobConfig::new()
            .with_key(self.key.clone())
            .with_description(self.description.clone())
            .with_durability(self.durable)
            .with_concurrent_execution_disallowed(self.concurrent_execution_disallowed)
            .with_job_data_map(self.job_data.clone())
    }
}
