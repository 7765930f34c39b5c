#![deny(clippy::all)]

/**
 * Scopeify CLI
 *
 * Command line front end: configuration loading, parallel scoping and output.
 */
pub mod args;
pub mod config;
pub mod perform_scope;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber. Reads `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
