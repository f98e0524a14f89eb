//! Logging setup
//!
//! Structured logging through `tracing`, written to stderr so it never mixes
//! with a document printed on stdout.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `repotxt=debug`
pub const LOG_ENV: &str = "REPOTXT_LOG";

/// Default level for a given `-v` count
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `REPOTXT_LOG` wins over the verbosity flag
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)))
}

/// Initialize the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
