//! Tracing setup for the runnable instances.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "FORMULARY_LOG";

/// Install a formatting subscriber.
///
/// The filter comes from `FORMULARY_LOG` when set, otherwise `debug` when
/// `verbose` and `warn` when not. Installing twice is not an error.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
