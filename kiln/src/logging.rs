//! Log subscriber setup for the kiln binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::GlobalOpts;

/// Environment variable overriding the log filter.
pub(crate) const LOG_ENV: &str = "KILN_LOG";

/// Install the global subscriber. Logs go to stderr.
pub(crate) fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global.verbosity_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn default_directive(level: u8) -> &'static str {
    match level {
        0 => "error",
        1 => "warn",
        2 => "debug",
        _ => "trace",
    }
}
