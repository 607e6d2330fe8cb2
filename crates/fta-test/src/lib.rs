//! FTA Test Harness - Model generation and invariant checking
//!
//! This crate provides:
//! - Seeded random fault tree generation
//! - Partition invariant checks against recursive descent
//! - Logging setup for tests and benchmarks

pub mod generator;
pub mod invariants;

pub use generator::*;
pub use invariants::*;

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG`, defaulting to warnings
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
