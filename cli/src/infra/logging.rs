//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so `--json` output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Takes precedence over `RUST_LOG`.
pub const LOG_ENV: &str = "KINDPUSH_LOG";

/// Level implied by the number of `-v` flags.
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter from `KINDPUSH_LOG`, else `RUST_LOG`, else the `-v` level.
#[must_use]
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
