//! Volatile, single-process job store.
//!
//! Every operation takes one `parking_lot::Mutex` around the whole store, so a
//! trigger's state and its membership in the ready index always change together.
//! Values go in and come out by clone; nothing handed to a caller aliases the
//! stored copy.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::core::{JobDetail, JobKey, JobStore, StoreError, Trigger, TriggerKey, TriggerState};
use crate::infra::index::{comparator, GroupMembership, OrderedIndex, TriggerHandle};

#[derive(Debug, Clone)]
struct TriggerWrapper {
    trigger: Trigger,
    state: TriggerState,
}

impl TriggerWrapper {
    fn handle(&self) -> TriggerHandle {
        TriggerHandle::from(&self.trigger)
    }
}

/// Everything guarded by the store lock. Methods here assume the lock is held
/// and never take it again.
#[derive(Debug)]
struct StoreInner {
    jobs_by_key: HashMap<JobKey, JobDetail>,
    jobs_by_group: HashMap<String, HashSet<JobKey>>,
    triggers_by_key: HashMap<TriggerKey, TriggerWrapper>,
    triggers_by_group: HashMap<String, HashSet<TriggerKey>>,
    triggers_by_job: HashMap<JobKey, HashSet<TriggerKey>>,
    time_triggers: OrderedIndex<TriggerHandle>,
    membership: GroupMembership,
}

impl StoreInner {
    fn new(config: &StoreConfig) -> Self {
        Self {
            jobs_by_key: HashMap::new(),
            jobs_by_group: HashMap::new(),
            triggers_by_key: HashMap::new(),
            triggers_by_group: HashMap::new(),
            triggers_by_job: HashMap::new(),
            time_triggers: OrderedIndex::new(comparator(config.index_ordering)),
            membership: GroupMembership::new(),
        }
    }

    fn put_job(&mut self, job: JobDetail, replace_existing: bool) -> Result<(), StoreError> {
        let key = job.key().clone();
        if let Some(existing) = self.jobs_by_key.get_mut(&key) {
            if !replace_existing {
                return Err(StoreError::JobAlreadyExists(key));
            }
            *existing = job;
            return Ok(());
        }
        self.jobs_by_group
            .entry(key.group().to_string())
            .or_default()
            .insert(key.clone());
        self.jobs_by_key.insert(key, job);
        Ok(())
    }

    fn put_trigger(&mut self, trigger: Trigger, replace_existing: bool) -> Result<(), StoreError> {
        trigger.validate()?;
        let key = trigger.key().clone();
        let exists = self.triggers_by_key.contains_key(&key);
        if exists && !replace_existing {
            return Err(StoreError::TriggerAlreadyExists(key));
        }
        if !self.jobs_by_key.contains_key(trigger.job_key()) {
            return Err(StoreError::JobPersistence(trigger.job_key().clone()));
        }
        if exists {
            self.remove_trigger(&key, false);
        }
        self.insert_trigger(trigger);
        Ok(())
    }

    /// Inserts a trigger whose preconditions were already checked.
    fn insert_trigger(&mut self, trigger: Trigger) {
        let key = trigger.key().clone();
        let state = self.membership.classify(&trigger);
        self.triggers_by_group
            .entry(key.group().to_string())
            .or_default()
            .insert(key.clone());
        self.triggers_by_job
            .entry(trigger.job_key().clone())
            .or_default()
            .insert(key.clone());
        let wrapper = TriggerWrapper { trigger, state };
        if state == TriggerState::Waiting {
            self.time_triggers.add(wrapper.handle());
        }
        self.triggers_by_key.insert(key, wrapper);
    }

    fn remove_trigger(&mut self, key: &TriggerKey, cascade: bool) -> bool {
        let Some(wrapper) = self.triggers_by_key.remove(key) else {
            return false;
        };
        if wrapper.state == TriggerState::Waiting {
            self.time_triggers.remove(&wrapper.handle());
        }
        remove_from_group(&mut self.triggers_by_group, key.group(), key);

        let job_key = wrapper.trigger.job_key();
        remove_from_group(&mut self.triggers_by_job, job_key, key);
        if cascade && !self.triggers_by_job.contains_key(job_key) {
            let durable = self.jobs_by_key.get(job_key).is_some_and(JobDetail::durable);
            if !durable {
                self.remove_job(job_key);
            }
        }
        true
    }

    fn remove_job(&mut self, key: &JobKey) -> bool {
        for trigger_key in self.trigger_keys_of(key) {
            self.remove_trigger(&trigger_key, false);
        }
        self.membership.unblock(key);
        if self.jobs_by_key.remove(key).is_none() {
            return false;
        }
        remove_from_group(&mut self.jobs_by_group, key.group(), key);
        true
    }

    fn trigger_keys_of(&self, job: &JobKey) -> Vec<TriggerKey> {
        sorted_keys(self.triggers_by_job.get(job))
    }

    fn trigger_keys_in(&self, group: &str) -> Vec<TriggerKey> {
        sorted_keys(self.triggers_by_group.get(group))
    }

    fn job_keys_in(&self, group: &str) -> Vec<JobKey> {
        sorted_keys(self.jobs_by_group.get(group))
    }

    /// Moves a trigger to `state`, keeping the ready index in step.
    fn set_state(&mut self, key: &TriggerKey, state: TriggerState) -> bool {
        let Some(wrapper) = self.triggers_by_key.get_mut(key) else {
            return false;
        };
        let previous = std::mem::replace(&mut wrapper.state, state);
        if previous == state {
            return true;
        }
        let handle = wrapper.handle();
        if previous == TriggerState::Waiting {
            self.time_triggers.remove(&handle);
        }
        if state == TriggerState::Waiting {
            self.time_triggers.add(handle);
        }
        true
    }

    fn state_of(&self, key: &TriggerKey) -> Option<TriggerState> {
        self.triggers_by_key.get(key).map(|w| w.state)
    }

    fn pause_trigger(&mut self, key: &TriggerKey) {
        let next = match self.state_of(key) {
            None | Some(TriggerState::Complete | TriggerState::Paused | TriggerState::PausedBlocked) => {
                return;
            }
            Some(TriggerState::Blocked) => TriggerState::PausedBlocked,
            Some(_) => TriggerState::Paused,
        };
        self.set_state(key, next);
    }

    fn resume_trigger(&mut self, key: &TriggerKey) {
        let Some(wrapper) = self.triggers_by_key.get(key) else {
            return;
        };
        if !wrapper.state.is_paused() {
            return;
        }
        let next = if self.membership.is_blocked(wrapper.trigger.job_key()) {
            TriggerState::Blocked
        } else {
            TriggerState::Waiting
        };
        self.set_state(key, next);
    }

    fn pause_trigger_group(&mut self, group: &str) {
        self.membership.pause_trigger_group(group);
        for key in self.trigger_keys_in(group) {
            self.pause_trigger(&key);
        }
    }

    fn resume_trigger_group(&mut self, group: &str) {
        self.membership.resume_trigger_group(group);
        for key in self.trigger_keys_in(group) {
            let job_group_paused = self
                .triggers_by_key
                .get(&key)
                .is_some_and(|w| self.membership.is_job_group_paused(w.trigger.job_key().group()));
            if !job_group_paused {
                self.resume_trigger(&key);
            }
        }
    }

    fn pause_job(&mut self, job: &JobKey) {
        for key in self.trigger_keys_of(job) {
            self.pause_trigger(&key);
        }
    }

    fn resume_job(&mut self, job: &JobKey, skip_paused_groups: bool) {
        for key in self.trigger_keys_of(job) {
            if skip_paused_groups && self.membership.is_trigger_group_paused(key.group()) {
                continue;
            }
            self.resume_trigger(&key);
        }
    }

    fn pause_job_group(&mut self, group: &str) {
        self.membership.pause_job_group(group);
        for job in self.job_keys_in(group) {
            self.pause_job(&job);
        }
    }

    fn resume_job_group(&mut self, group: &str) {
        self.membership.resume_job_group(group);
        for job in self.job_keys_in(group) {
            self.resume_job(&job, true);
        }
    }

    fn block_job(&mut self, job: &JobKey) {
        self.membership.block(job);
        for key in self.trigger_keys_of(job) {
            let next = match self.state_of(&key) {
                Some(TriggerState::Waiting) => TriggerState::Blocked,
                Some(TriggerState::Paused) => TriggerState::PausedBlocked,
                _ => continue,
            };
            self.set_state(&key, next);
        }
    }

    fn unblock_job(&mut self, job: &JobKey) {
        self.membership.unblock(job);
        for key in self.trigger_keys_of(job) {
            let next = match self.state_of(&key) {
                Some(TriggerState::Blocked) => TriggerState::Waiting,
                Some(TriggerState::PausedBlocked) => TriggerState::Paused,
                _ => continue,
            };
            self.set_state(&key, next);
        }
    }

    fn check_pair(&self, job: &JobDetail, trigger: &Trigger) -> Result<(), StoreError> {
        job.key().validate()?;
        trigger.validate()?;
        if self.jobs_by_key.contains_key(job.key()) {
            return Err(StoreError::JobAlreadyExists(job.key().clone()));
        }
        if self.triggers_by_key.contains_key(trigger.key()) {
            return Err(StoreError::TriggerAlreadyExists(trigger.key().clone()));
        }
        if trigger.job_key() != job.key() && !self.jobs_by_key.contains_key(trigger.job_key()) {
            return Err(StoreError::JobPersistence(trigger.job_key().clone()));
        }
        Ok(())
    }

    /// Whether `key` can be swapped for `trigger`; `false` when nothing is stored under `key`.
    fn check_replacement(&self, key: &TriggerKey, trigger: &Trigger) -> Result<bool, StoreError> {
        trigger.validate()?;
        let Some(old) = self.triggers_by_key.get(key) else {
            return Ok(false);
        };
        if old.trigger.job_key() != trigger.job_key() {
            return Err(StoreError::TriggerJobMismatch {
                trigger: key.clone(),
                expected: old.trigger.job_key().clone(),
                actual: trigger.job_key().clone(),
            });
        }
        if trigger.key() != key && self.triggers_by_key.contains_key(trigger.key()) {
            return Err(StoreError::TriggerAlreadyExists(trigger.key().clone()));
        }
        Ok(true)
    }

    /// Checks every precondition of a batch before anything is stored.
    fn check_batch(
        &self,
        batch: &[(JobDetail, Vec<Trigger>)],
        replace_existing: bool,
    ) -> Result<(), StoreError> {
        let mut jobs = HashSet::new();
        let mut triggers = HashSet::new();
        for (job, job_triggers) in batch {
            job.key().validate()?;
            let fresh = jobs.insert(job.key());
            if !replace_existing && (!fresh || self.jobs_by_key.contains_key(job.key())) {
                return Err(StoreError::JobAlreadyExists(job.key().clone()));
            }
            for trigger in job_triggers {
                trigger.validate()?;
                let fresh = triggers.insert(trigger.key());
                if !replace_existing && (!fresh || self.triggers_by_key.contains_key(trigger.key())) {
                    return Err(StoreError::TriggerAlreadyExists(trigger.key().clone()));
                }
            }
        }
        for (_, job_triggers) in batch {
            for trigger in job_triggers {
                let job_key = trigger.job_key();
                if !jobs.contains(job_key) && !self.jobs_by_key.contains_key(job_key) {
                    return Err(StoreError::JobPersistence(job_key.clone()));
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.jobs_by_key.clear();
        self.jobs_by_group.clear();
        self.triggers_by_key.clear();
        self.triggers_by_group.clear();
        self.triggers_by_job.clear();
        self.time_triggers.clear();
        self.membership.clear();
    }
}

/// Removes `key` from the set stored under `group`, dropping the set once empty.
fn remove_from_group<G, Q, K>(index: &mut HashMap<G, HashSet<K>>, group: &Q, key: &K)
where
    G: Borrow<Q> + Eq + Hash,
    Q: ?Sized + Eq + Hash,
    K: Eq + Hash,
{
    if let Some(keys) = index.get_mut(group) {
        keys.remove(key);
        if keys.is_empty() {
            index.remove(group);
        }
    }
}

fn sorted_keys<K: Clone + Ord>(keys: Option<&HashSet<K>>) -> Vec<K> {
    let mut keys: Vec<K> = keys.map(|k| k.iter().cloned().collect()).unwrap_or_default();
    keys.sort();
    keys
}

fn sorted_names<V>(index: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = index.keys().cloned().collect();
    names.sort();
    names
}

/// In-memory [`JobStore`]. Nothing survives the process.
#[derive(Debug)]
pub struct RamJobStore {
    name: String,
    inner: Mutex<StoreInner>,
}

impl Default for RamJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RamJobStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store from `config`.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let inner = StoreInner::new(&config);
        debug!(store = %config.name, ordering = ?config.index_ordering, "Job store created");
        Self {
            name: config.name,
            inner: Mutex::new(inner),
        }
    }

    /// Instance name from the configuration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn rejected<T>(&self, operation: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(err) = &result {
            warn!(store = %self.name, operation, error = %err, "Store operation rejected");
        }
        result
    }
}

impl JobStore for RamJobStore {
    fn scheduler_started(&self) -> Result<(), StoreError> {
        info!(store = %self.name, "Scheduler started");
        Ok(())
    }

    fn scheduler_paused(&self) {
        info!(store = %self.name, "Scheduler paused");
    }

    fn scheduler_resumed(&self) {
        info!(store = %self.name, "Scheduler resumed");
    }

    fn shutdown(&self) {
        info!(store = %self.name, "Job store shut down");
    }

    fn supports_persistence(&self) -> bool {
        false
    }

    fn clustered(&self) -> bool {
        false
    }

    fn store_job_and_trigger(&self, job: JobDetail, trigger: Trigger) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let result = inner.check_pair(&job, &trigger);
        self.rejected("store_job_and_trigger", result)?;

        debug!(store = %self.name, job = %job.key(), trigger = %trigger.key(), "Job and trigger stored");
        inner.put_job(job, false)?;
        inner.put_trigger(trigger, false)
    }

    fn store_jobs_and_triggers(
        &self,
        batch: Vec<(JobDetail, Vec<Trigger>)>,
        replace: bool,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        self.rejected("store_jobs_and_triggers", inner.check_batch(&batch, replace))?;

        let mut pending = Vec::new();
        for (job, triggers) in batch {
            inner.put_job(job, replace)?;
            pending.extend(triggers);
        }
        let count = pending.len();
        for trigger in pending {
            inner.put_trigger(trigger, replace)?;
        }
        debug!(store = %self.name, triggers = count, replace, "Batch stored");
        Ok(())
    }

    fn store_job(&self, job: JobDetail, replace_existing: bool) -> Result<(), StoreError> {
        let key = job.key().clone();
        let result = key
            .validate()
            .map_err(StoreError::from)
            .and_then(|()| self.inner.lock().put_job(job, replace_existing));
        self.rejected("store_job", result)?;
        debug!(store = %self.name, job = %key, "Job stored");
        Ok(())
    }

    fn remove_job(&self, key: &JobKey) -> Result<bool, StoreError> {
        let found = self.inner.lock().remove_job(key);
        debug!(store = %self.name, job = %key, found, "Job removed");
        Ok(found)
    }

    fn remove_jobs(&self, keys: &[JobKey]) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        let mut all_found = true;
        for key in keys {
            all_found = inner.remove_job(key) && all_found;
        }
        debug!(store = %self.name, count = keys.len(), all_found, "Jobs removed");
        Ok(all_found)
    }

    fn retrieve_job(&self, key: &JobKey) -> Option<JobDetail> {
        self.inner.lock().jobs_by_key.get(key).cloned()
    }

    fn store_trigger(&self, trigger: Trigger, replace_existing: bool) -> Result<(), StoreError> {
        let key = trigger.key().clone();
        let result = self.inner.lock().put_trigger(trigger, replace_existing);
        self.rejected("store_trigger", result)?;
        debug!(store = %self.name, trigger = %key, "Trigger stored");
        Ok(())
    }

    fn remove_trigger(&self, key: &TriggerKey) -> Result<bool, StoreError> {
        let found = self.inner.lock().remove_trigger(key, true);
        debug!(store = %self.name, trigger = %key, found, "Trigger removed");
        Ok(found)
    }

    fn remove_triggers(&self, keys: &[TriggerKey]) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        let mut all_found = true;
        for key in keys {
            all_found = inner.remove_trigger(key, true) && all_found;
        }
        debug!(store = %self.name, count = keys.len(), all_found, "Triggers removed");
        Ok(all_found)
    }

    fn replace_trigger(&self, key: &TriggerKey, trigger: Trigger) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        let result = inner.check_replacement(key, &trigger);
        if !self.rejected("replace_trigger", result)? {
            return Ok(false);
        }

        debug!(store = %self.name, old = %key, new = %trigger.key(), "Trigger replaced");
        inner.remove_trigger(key, false);
        inner.insert_trigger(trigger);
        Ok(true)
    }

    fn retrieve_trigger(&self, key: &TriggerKey) -> Option<Trigger> {
        self.inner
            .lock()
            .triggers_by_key
            .get(key)
            .map(|w| w.trigger.clone())
    }

    fn check_job_exists(&self, key: &JobKey) -> bool {
        self.inner.lock().jobs_by_key.contains_key(key)
    }

    fn check_trigger_exists(&self, key: &TriggerKey) -> bool {
        self.inner.lock().triggers_by_key.contains_key(key)
    }

    fn number_of_jobs(&self) -> usize {
        self.inner.lock().jobs_by_key.len()
    }

    fn number_of_triggers(&self) -> usize {
        self.inner.lock().triggers_by_key.len()
    }

    fn triggers_for_job(&self, key: &JobKey) -> Vec<Trigger> {
        let inner = self.inner.lock();
        inner
            .trigger_keys_of(key)
            .iter()
            .filter_map(|k| inner.triggers_by_key.get(k))
            .map(|w| w.trigger.clone())
            .collect()
    }

    fn job_group_names(&self) -> Vec<String> {
        sorted_names(&self.inner.lock().jobs_by_group)
    }

    fn trigger_group_names(&self) -> Vec<String> {
        sorted_names(&self.inner.lock().triggers_by_group)
    }

    fn job_keys(&self, group: &str) -> Vec<JobKey> {
        self.inner.lock().job_keys_in(group)
    }

    fn trigger_keys(&self, group: &str) -> Vec<TriggerKey> {
        self.inner.lock().trigger_keys_in(group)
    }

    fn trigger_state(&self, key: &TriggerKey) -> Option<TriggerState> {
        self.inner.lock().state_of(key)
    }

    fn set_trigger_state(&self, key: &TriggerKey, state: TriggerState) -> bool {
        let found = self.inner.lock().set_state(key, state);
        debug!(store = %self.name, trigger = %key, %state, found, "Trigger state set");
        found
    }

    fn pause_trigger(&self, key: &TriggerKey) {
        self.inner.lock().pause_trigger(key);
        info!(store = %self.name, trigger = %key, "Trigger paused");
    }

    fn pause_trigger_group(&self, group: &str) {
        self.inner.lock().pause_trigger_group(group);
        info!(store = %self.name, group, "Trigger group paused");
    }

    fn pause_job(&self, key: &JobKey) {
        self.inner.lock().pause_job(key);
        info!(store = %self.name, job = %key, "Job paused");
    }

    fn pause_job_group(&self, group: &str) {
        self.inner.lock().pause_job_group(group);
        info!(store = %self.name, group, "Job group paused");
    }

    fn resume_trigger(&self, key: &TriggerKey) {
        self.inner.lock().resume_trigger(key);
        info!(store = %self.name, trigger = %key, "Trigger resumed");
    }

    fn resume_trigger_group(&self, group: &str) {
        self.inner.lock().resume_trigger_group(group);
        info!(store = %self.name, group, "Trigger group resumed");
    }

    fn resume_job(&self, key: &JobKey) {
        self.inner.lock().resume_job(key, false);
        info!(store = %self.name, job = %key, "Job resumed");
    }

    fn resume_job_group(&self, group: &str) {
        self.inner.lock().resume_job_group(group);
        info!(store = %self.name, group, "Job group resumed");
    }

    fn pause_all(&self) {
        let mut inner = self.inner.lock();
        for group in sorted_names(&inner.triggers_by_group) {
            inner.pause_trigger_group(&group);
        }
        info!(store = %self.name, "All trigger groups paused");
    }

    fn resume_all(&self) {
        let mut inner = self.inner.lock();
        inner.membership.clear_paused_job_groups();
        let mut groups = sorted_names(&inner.triggers_by_group);
        groups.extend(inner.membership.paused_trigger_groups());
        groups.sort();
        groups.dedup();
        for group in groups {
            inner.resume_trigger_group(&group);
        }
        info!(store = %self.name, "All groups resumed");
    }

    fn paused_trigger_groups(&self) -> Vec<String> {
        self.inner.lock().membership.paused_trigger_groups()
    }

    fn block_job(&self, key: &JobKey) {
        self.inner.lock().block_job(key);
        debug!(store = %self.name, job = %key, "Job blocked");
    }

    fn unblock_job(&self, key: &JobKey) {
        self.inner.lock().unblock_job(key);
        debug!(store = %self.name, job = %key, "Job unblocked");
    }

    fn next_due_triggers(&self, no_later_than: DateTime<Utc>, max_count: usize) -> Vec<Trigger> {
        let inner = self.inner.lock();
        inner
            .time_triggers
            .iter()
            .filter(|h| h.next_fire_time.is_some_and(|t| t <= no_later_than))
            .filter_map(|h| inner.triggers_by_key.get(&h.key))
            .map(|w| w.trigger.clone())
            .take(max_count)
            .collect()
    }

    fn clear(&self) {
        self.inner.lock().clear();
        info!(store = %self.name, "Job store cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{JobConfig, SimpleScheduleConfig, TriggerConfig};
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).single().expect("valid instant")
    }

    fn job(name: &str) -> JobDetail {
        JobConfig::new().with_identity(name).build().expect("job")
    }

    fn trigger(name: &str, job: &str, offset_secs: i64) -> Trigger {
        let mut t = TriggerConfig::new()
            .with_identity(name)
            .for_job(job)
            .start_at(t0() + TimeDelta::seconds(offset_secs))
            .with_schedule(SimpleScheduleConfig::new().with_interval_in_seconds(60).repeat_forever())
            .build()
            .expect("trigger");
        t.compute_first_fire_time();
        t
    }

    fn indexed(store: &RamJobStore) -> Vec<String> {
        store
            .inner
            .lock()
            .time_triggers
            .iter()
            .map(|h| h.key.name().to_string())
            .collect()
    }

    #[test]
    fn index_holds_only_waiting_triggers() {
        let store = RamJobStore::new();
        store.store_job(job("j"), false).expect("job");
        store.store_trigger(trigger("a", "j", 10), false).expect("a");
        store.store_trigger(trigger("b", "j", 5), false).expect("b");
        assert_eq!(indexed(&store), vec!["b", "a"]);

        store.pause_trigger(&TriggerKey::new("b"));
        assert_eq!(indexed(&store), vec!["a"]);

        store.set_trigger_state(&TriggerKey::new("a"), TriggerState::Acquired);
        assert!(indexed(&store).is_empty());

        store.resume_trigger(&TriggerKey::new("b"));
        store.set_trigger_state(&TriggerKey::new("a"), TriggerState::Waiting);
        assert_eq!(indexed(&store), vec!["b", "a"]);
    }

    #[test]
    fn removing_the_last_trigger_drops_empty_groups() {
        let store = RamJobStore::new();
        store.store_job(job("j"), false).expect("job");
        store.store_trigger(trigger("a", "j", 0), false).expect("a");
        store.remove_trigger(&TriggerKey::new("a")).expect("remove");

        let inner = store.inner.lock();
        assert!(inner.triggers_by_group.is_empty());
        assert!(inner.triggers_by_job.is_empty());
        assert!(inner.jobs_by_group.is_empty());
        assert!(inner.time_triggers.is_empty());
    }

    #[test]
    fn replace_keeps_index_consistent() {
        let store = RamJobStore::new();
        store.store_job(job("j"), false).expect("job");
        store.store_trigger(trigger("a", "j", 30), false).expect("a");
        store
            .store_trigger(trigger("a", "j", 1), true)
            .expect("replace");

        let inner = store.inner.lock();
        assert_eq!(inner.time_triggers.len(), 1);
        assert_eq!(
            inner.time_triggers.first().and_then(|h| h.next_fire_time),
            Some(t0() + TimeDelta::seconds(1))
        );
    }

    #[test]
    fn key_ordering_is_configurable() {
        let config = StoreConfig {
            index_ordering: crate::config::IndexOrdering::Key,
            ..StoreConfig::default()
        };
        let store = RamJobStore::with_config(config);
        store.store_job(job("j"), false).expect("job");
        store.store_trigger(trigger("z", "j", 1), false).expect("z");
        store.store_trigger(trigger("a", "j", 9), false).expect("a");
        assert_eq!(indexed(&store), vec!["a", "z"]);
    }
}
