//! Tracing/logging initialization.
//!
//! The store layer logs every rejected write, skipped reorder item and
//! storage failure through `tracing`; this wires those events to stdout.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops), so test
/// binaries can call it from every setup helper.
pub fn init() {
    // Defaults to `info`; override per-module with RUST_LOG.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
