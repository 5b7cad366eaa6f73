// src/lib.rs
pub mod chart;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod filter;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod snapshot;
pub mod state;
pub mod store;

use tracing_subscriber::EnvFilter;

/// fmt subscriber driven by `RUST_LOG`, defaulting to `info`. Logs go to stderr so
/// binaries that print documents keep stdout clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
