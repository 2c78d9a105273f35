//! Diagnostic logging to stderr.
//!
//! User-facing output goes to stdout with `println!`; tracing events are
//! diagnostics only. The filter comes from `MORIO_LOG` (an `EnvFilter`
//! directive such as `debug` or `morio=info`) and defaults to `warn`. Each
//! `-v` raises the default level.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "MORIO_LOG";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Default level for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Filter for `verbose`, unless `MORIO_LOG` is set and valid.
pub fn build_filter(verbose: u8) -> EnvFilter {
    let fallback = level_for_verbosity(verbose);
    if verbose > 0 {
        return EnvFilter::new(fallback);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: u8) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(build_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();

        if result.is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}
