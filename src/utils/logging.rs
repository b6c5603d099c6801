//! Log subscriber setup for the binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Build the filter for a verbosity level.
///
/// `RUST_LOG` wins when set; otherwise other crates stay at `warn` and Mazer
/// logs at `level`.
#[must_use]
pub fn log_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mazer={}", level.as_str().to_lowercase())))
}

/// Install the global subscriber, writing to stderr so stdout stays parseable.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
