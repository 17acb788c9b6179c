//! Diagnostic logging setup
//!
//! Logs go to stderr so evaluated process lists on stdout stay pipeable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the level follows the
/// `--verbose` / `--quiet` flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "sixsigma=debug,warn"
    } else if quiet {
        "error"
    } else {
        "sixsigma=warn,error"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_target(verbose)
        .without_time()
        .with_writer(std::io::stderr);

    // try_init: a subscriber may already be installed when embedded
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
