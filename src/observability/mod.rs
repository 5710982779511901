//! Logging setup.
//!
//! `RUST_LOG` takes precedence; otherwise the level is `debug` in debug mode
//! and `info` elsewhere. Output goes to stderr so `analyze` can print JSON on
//! stdout.

use tracing_subscriber::EnvFilter;

pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debtcleaner=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
