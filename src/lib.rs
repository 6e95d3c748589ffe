//! # Prometheus Job Store
//!
//! Storage and timing substrate for a job scheduler.
//!
//! The crate holds the data a scheduler's dispatch loop works against: named
//! jobs, the triggers that fire them, and the state each trigger is in. It does
//! not run jobs itself; a dispatch loop polls [`JobStore::next_due_triggers`],
//! executes, and reports back through [`JobStore::set_trigger_state`].
//!
//! ## Key Features
//!
//! - **Identity keys**: `(group, name)` pairs encoded as `group.name`, with
//!   unique-name generation from an injectable random source
//! - **Dirty-flag data maps**: typed job data that tracks its own mutations
//! - **Fire-time arithmetic**: fixed-interval repeating schedules with bounded
//!   or unbounded repeat counts and an optional end time
//! - **Single-lock store**: every operation is atomic on its own; the ready
//!   index only ever holds `WAITING` triggers
//! - **Pause, resume and blocking** by trigger, job, or group
//!
//! ## Quick Start
//!
//! ```rust
//! use prometheus_job_store::builders::{JobConfig, SimpleScheduleConfig, TriggerConfig};
//! use prometheus_job_store::core::JobStore;
//! use prometheus_job_store::infra::store::RamJobStore;
//!
//! let store = RamJobStore::new();
//! let job = JobConfig::new().with_identity("report").build()?;
//! let mut trigger = TriggerConfig::new()
//!     .with_identity("every-minute")
//!     .for_job_detail(&job)
//!     .start_now()
//!     .with_schedule(SimpleScheduleConfig::new().with_interval_in_seconds(60).repeat_forever())
//!     .build()?;
//! trigger.compute_first_fire_time();
//!
//! store.store_job_and_trigger(job, trigger)?;
//! assert_eq!(store.number_of_triggers(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Keys, data maps, jobs, triggers and the store contract.
pub mod core;
/// Store configuration loaded from JSON or the environment.
pub mod config;
/// Immutable configuration objects that build jobs and triggers.
pub mod builders;
/// Store backends and the indices they maintain.
pub mod infra;
/// Async adapters over the blocking store.
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
/// Clock and telemetry helpers.
pub mod util;

pub use crate::core::JobStore;
