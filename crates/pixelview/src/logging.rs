//! Logging utilities

/// Initialize the logging system.
///
/// Thin wrapper over `env_logger` so applications that don't care about
/// logger configuration get sensible output from `RUST_LOG`.
pub fn init_logging() {
    env_logger::init();
}
