//! Logging setup
//!
//! Logs go to stderr so stdout only carries the report.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber
///
/// Priority: `RUST_LOG` env var > `--verbose` (debug) > default "warn"
pub fn init_telemetry(verbose: bool) {
    let default_filter = if verbose { "warn,aoc_run=debug" } else { "warn" };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
