//! Tracing setup shared by the MicroCoach binaries.
//!
//! Everything is written to stderr; stdout belongs to command output
//! (routines, JSON) so it can be piped.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for the HTTP server: request spans from tower-http included
pub const SERVER_FILTER: &str = "info,tower_http=debug";

/// Initialize logging at INFO unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("info")
}

/// Initialize logging for the HTTP server
pub fn init_server() {
    init_with_level(SERVER_FILTER)
}

/// Initialize logging with `default_filter` as the fallback directive
///
/// RUST_LOG always wins when it is set and parses.
pub fn init_with_level(default_filter: &str) {
    tracing_subscriber::registry()
        .with(filter_or(default_filter))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn filter_or(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Route logs through the test harness capture
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
