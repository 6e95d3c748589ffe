//! Group membership sets: paused trigger groups, paused job groups, blocked jobs.

use std::collections::HashSet;

use crate::core::{JobKey, Trigger, TriggerState};

/// Pause and block bookkeeping used to derive trigger states.
#[derive(Debug, Default, Clone)]
pub struct GroupMembership {
    paused_trigger_groups: HashSet<String>,
    paused_job_groups: HashSet<String>,
    blocked_jobs: HashSet<JobKey>,
}

impl GroupMembership {
    /// Creates empty sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a paused trigger group. Returns whether it was newly added.
    pub fn pause_trigger_group(&mut self, group: &str) -> bool {
        self.paused_trigger_groups.insert(group.to_string())
    }

    /// Forgets a paused trigger group. Returns whether it was paused.
    pub fn resume_trigger_group(&mut self, group: &str) -> bool {
        self.paused_trigger_groups.remove(group)
    }

    /// Whether a trigger group is paused.
    #[must_use]
    pub fn is_trigger_group_paused(&self, group: &str) -> bool {
        self.paused_trigger_groups.contains(group)
    }

    /// Paused trigger groups, sorted.
    #[must_use]
    pub fn paused_trigger_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.paused_trigger_groups.iter().cloned().collect();
        groups.sort();
        groups
    }

    /// Records a paused job group. Returns whether it was newly added.
    pub fn pause_job_group(&mut self, group: &str) -> bool {
        self.paused_job_groups.insert(group.to_string())
    }

    /// Forgets a paused job group. Returns whether it was paused.
    pub fn resume_job_group(&mut self, group: &str) -> bool {
        self.paused_job_groups.remove(group)
    }

    /// Whether a job group is paused.
    #[must_use]
    pub fn is_job_group_paused(&self, group: &str) -> bool {
        self.paused_job_groups.contains(group)
    }

    /// Forgets every paused job group.
    pub fn clear_paused_job_groups(&mut self) {
        self.paused_job_groups.clear();
    }

    /// Marks a job as blocked. Returns whether it was newly added.
    pub fn block(&mut self, key: &JobKey) -> bool {
        self.blocked_jobs.insert(key.clone())
    }

    /// Releases a blocked job. Returns whether it was blocked.
    pub fn unblock(&mut self, key: &JobKey) -> bool {
        self.blocked_jobs.remove(key)
    }

    /// Whether a job is blocked.
    #[must_use]
    pub fn is_blocked(&self, key: &JobKey) -> bool {
        self.blocked_jobs.contains(key)
    }

    /// Whether either group of `trigger` is paused.
    #[must_use]
    pub fn holds_paused(&self, trigger: &Trigger) -> bool {
        self.is_trigger_group_paused(trigger.key().group())
            || self.is_job_group_paused(trigger.job_key().group())
    }

    /// State a freshly stored trigger starts in.
    #[must_use]
    pub fn classify(&self, trigger: &Trigger) -> TriggerState {
        let blocked = self.is_blocked(trigger.job_key());
        match (self.holds_paused(trigger), blocked) {
            (true, true) => TriggerState::PausedBlocked,
            (true, false) => TriggerState::Paused,
            (false, true) => TriggerState::Blocked,
            (false, false) => TriggerState::Waiting,
        }
    }

    /// Forgets every pause and block.
    pub fn clear(&mut self) {
        self.paused_trigger_groups.clear();
        self.paused_job_groups.clear();
        self.blocked_jobs.clear();
    }
}
