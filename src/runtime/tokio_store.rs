//! Tokio adapter for job stores.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::core::{AppResult, JobDetail, JobKey, JobStore, Trigger, TriggerKey};

/// Runs blocking store calls on the tokio blocking pool with a deadline.
///
/// A call that misses the deadline fails with a timeout error, but the store
/// still completes it: store operations are not cancellable.
pub struct AsyncStoreHandle<S> {
    store: Arc<S>,
    handle: tokio::runtime::Handle,
    timeout: Duration,
}

impl<S> Clone for AsyncStoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            handle: self.handle.clone(),
            timeout: self.timeout,
        }
    }
}

impl<S: JobStore + 'static> AsyncStoreHandle<S> {
    /// Wraps `store`, running calls on the runtime behind `handle`.
    pub fn new(store: Arc<S>, handle: tokio::runtime::Handle, timeout: Duration) -> Self {
        Self {
            store,
            handle,
            timeout,
        }
    }

    /// Wraps `store` using the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Fails outside of a tokio runtime.
    pub fn current(store: Arc<S>, timeout: Duration) -> AppResult<Self> {
        let handle = tokio::runtime::Handle::try_current()?;
        Ok(Self::new(store, handle, timeout))
    }

    /// The wrapped store, for synchronous access.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Deadline applied to each call.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `op` against the store on the blocking pool.
    ///
    /// # Errors
    ///
    /// Fails when the deadline passes first or the operation panics.
    pub async fn run<R, F>(&self, op: F) -> AppResult<R>
    where
        F: FnOnce(&S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let task = self.handle.spawn_blocking(move || op(&store));
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join)) => Err(anyhow::anyhow!("store call failed: {join}")),
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis(), "Store call timed out");
                Err(anyhow::anyhow!(
                    "store call timed out after {}ms",
                    self.timeout.as_millis()
                ))
            }
        }
    }

    /// See [`JobStore::store_job`].
    ///
    /// # Errors
    ///
    /// Store rejection or timeout.
    pub async fn store_job(&self, job: JobDetail, replace_existing: bool) -> AppResult<()> {
        Ok(self.run(move |s| s.store_job(job, replace_existing)).await??)
    }

    /// See [`JobStore::store_job_and_trigger`].
    ///
    /// # Errors
    ///
    /// Store rejection or timeout.
    pub async fn store_job_and_trigger(&self, job: JobDetail, trigger: Trigger) -> AppResult<()> {
        Ok(self.run(move |s| s.store_job_and_trigger(job, trigger)).await??)
    }

    /// See [`JobStore::store_trigger`].
    ///
    /// # Errors
    ///
    /// Store rejection or timeout.
    pub async fn store_trigger(&self, trigger: Trigger, replace_existing: bool) -> AppResult<()> {
        Ok(self.run(move |s| s.store_trigger(trigger, replace_existing)).await??)
    }

    /// See [`JobStore::remove_job`].
    ///
    /// # Errors
    ///
    /// Timeout.
    pub async fn remove_job(&self, key: JobKey) -> AppResult<bool> {
        Ok(self.run(move |s| s.remove_job(&key)).await??)
    }

    /// See [`JobStore::remove_trigger`].
    ///
    /// # Errors
    ///
    /// Timeout.
    pub async fn remove_trigger(&self, key: TriggerKey) -> AppResult<bool> {
        Ok(self.run(move |s| s.remove_trigger(&key)).await??)
    }

    /// See [`JobStore::retrieve_job`].
    ///
    /// # Errors
    ///
    /// Timeout.
    pub async fn retrieve_job(&self, key: JobKey) -> AppResult<Option<JobDetail>> {
        self.run(move |s| s.retrieve_job(&key)).await
    }

    /// See [`JobStore::retrieve_trigger`].
    ///
    /// # Errors
    ///
    /// Timeout.
    pub async fn retrieve_trigger(&self, key: TriggerKey) -> AppResult<Option<Trigger>> {
        self.run(move |s| s.retrieve_trigger(&key)).await
    }

    /// See [`JobStore::next_due_triggers`].
    ///
    /// # Errors
    ///
    /// Timeout.
    pub async fn next_due_triggers(
        &self,
        no_later_than: DateTime<Utc>,
        max_count: usize,
    ) -> AppResult<Vec<Trigger>> {
        self.run(move |s| s.next_due_triggers(no_later_than, max_count))
            .await
    }
}
