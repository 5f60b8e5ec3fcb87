//! Logging init for hosts that embed the engine.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// Respects `RUST_LOG`; defaults to `info` globally and `debug` for this
/// crate. Call once from the host; a second call is a no-op error from the
/// subscriber, which is swallowed so embedding in tests stays painless.
pub fn init_logging_stderr() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,rup_core=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
