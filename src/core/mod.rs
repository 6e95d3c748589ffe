//! Core domain types, timing model and the storage abstraction.

pub mod data_map;
pub mod error;
pub mod job;
pub mod key;
pub mod state;
pub mod store;
pub mod trigger;

pub use data_map::{DataValue, DirtyFlagMap, JobDataMap};
pub use error::{AppResult, StoreError, ValidationError};
pub use job::JobDetail;
pub use key::{unique_name, JobKey, TriggerKey, DEFAULT_GROUP};
pub use state::TriggerState;
pub use store::JobStore;
pub use trigger::{RepeatCount, Schedule, SimpleSchedule, Trigger};
