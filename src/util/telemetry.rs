//! Telemetry helpers for structured logging and tracing.
//!
//! The store emits `tracing` events under the `prometheus_job_store` target,
//! each carrying a `store` field with the configured store name:
//!
//! - `info`: scheduler lifecycle, pause and resume of triggers, jobs and
//!   groups, and `clear`.
//! - `debug`: store and removal of jobs and triggers, replacements, explicit
//!   state changes, and job blocking.
//! - `warn`: rejected operations (with `operation` and `error` fields) and
//!   async store calls that exceed their timeout.

/// Installs a default subscriber filtered by `RUST_LOG`, unless one is already set.
///
/// Safe to call more than once. `RUST_LOG=prometheus_job_store=debug` shows
/// every store mutation; `info` keeps only lifecycle and pause/resume events.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}
