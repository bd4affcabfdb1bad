//! Tests for the riskmodel tracing system.

use std::sync::Mutex;

use riskmodel_core::tracing::setup::init_tracing;

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// TRC-01: RISKMODEL_LOG with per-crate directives is accepted
#[test]
fn test_per_crate_filtering() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("RISKMODEL_LOG", "riskmodel_analysis=debug,riskmodel_storage=warn");
    init_tracing();
    std::env::remove_var("RISKMODEL_LOG");
}

/// TRC-02: init_tracing is idempotent
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

/// TRC-03: invalid filter falls back instead of panicking
#[test]
fn test_invalid_filter_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("RISKMODEL_LOG", "[[[not a filter");
    init_tracing();
    std::env::remove_var("RISKMODEL_LOG");
}
