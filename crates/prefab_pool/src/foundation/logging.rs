//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`, falling back to `default_filter`
/// when the variable is unset. Safe to call more than once; later calls
/// are ignored.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Initialize logging for unit tests
///
/// Captured by the test harness so output only shows for failing tests.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
