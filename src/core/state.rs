//! Derived lifecycle state of a stored trigger.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state the store tracks for every trigger.
///
/// Only [`TriggerState::Waiting`] triggers are visible to the ready index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    /// Eligible for the normal fire-time scan.
    Waiting,
    /// Claimed by the dispatch loop, about to fire.
    Acquired,
    /// Its job is running.
    Executing,
    /// No further fires.
    Complete,
    /// Held back by a pause.
    Paused,
    /// Held back because its job is executing exclusively.
    Blocked,
    /// Both paused and blocked.
    PausedBlocked,
    /// Failed; only reachable through an externally reported failure.
    Error,
}

impl TriggerState {
    /// Whether the state holds the trigger back because of a pause.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused | Self::PausedBlocked)
    }
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Waiting => "WAITING",
            Self::Acquired => "ACQUIRED",
            Self::Executing => "EXECUTING",
            Self::Complete => "COMPLETE",
            Self::Paused => "PAUSED",
            Self::Blocked => "BLOCKED",
            Self::PausedBlocked => "PAUSED_BLOCKED",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}
