//! Log subscriber setup.
//!
//! Events go to stderr through [`crate::stderr_buffer`], which holds them
//! back while the terminal form owns the screen.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `wellscore=trace`.
pub const LOG_ENV: &str = "WELLSCORE_LOG";

/// Filter used when `WELLSCORE_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "wellscore=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(crate::stderr_buffer::writer)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
