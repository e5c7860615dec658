//! Tracing/logging initialization.
//!
//! The RBAC crates emit `debug`-level events on denied navigations; hosts
//! call [`init`] once at startup to surface them.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// `service` names the host in the log stream (several portal hosts share
/// one sink); it is recorded on the startup event and hosts echo it on
/// their root spans.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(service: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();

    info!(service, "logging initialized");
}
