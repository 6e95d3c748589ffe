//! Immutable configuration objects for jobs, triggers and schedules.

pub mod job_builder;
pub mod trigger_builder;

pub use job_builder::JobConfig;
pub use trigger_builder::{SimpleScheduleConfig, TriggerConfig};
