//! Tracing setup for the command-line binary

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `SHIPSHAPE_LOG=shipshape=debug`.
pub const LOG_ENV: &str = "SHIPSHAPE_LOG";

static INIT: Once = Once::new();

/// Install a stderr subscriber so stdout stays reserved for the report.
///
/// `SHIPSHAPE_LOG` takes precedence; otherwise warnings only, or debug
/// output when `verbose` is set. Calling this more than once is a no-op.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "shipshape=debug"
        } else {
            "shipshape=warn"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    });
}
