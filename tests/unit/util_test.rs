//! Tests for utility functions

use prometheus_job_store::util::{clock, init_tracing};

#[test]
fn test_clock_now_ms_tracks_now() {
    let before = clock::now().timestamp_millis();
    let ms = clock::now_ms();
    let after = clock::now().timestamp_millis();
    assert!(before <= ms && ms <= after);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialised twice without panicking");
}
