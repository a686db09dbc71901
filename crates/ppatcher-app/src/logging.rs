//! Process-wide logger setup.

use env_logger::Env;

/// Environment variable holding the log filter, e.g. `debug` or
/// `ppatcher_gate=debug`.
pub const LOG_FILTER_ENV: &str = "PPATCHER_LOG";

/// Installs the `env_logger` backend. Defaults to `info`; later calls are
/// no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_FILTER_ENV, "info"))
        .format_timestamp_millis()
        .try_init();
}
