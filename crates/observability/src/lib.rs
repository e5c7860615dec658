//! `opsdash-observability` — logging/tracing setup for portal hosts.

pub mod tracing;

pub use self::tracing::init;
