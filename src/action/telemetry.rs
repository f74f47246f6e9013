//! Log subscriber installation.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global `fmt` subscriber writing compact lines to stderr.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Returns an error when a global subscriber was already set.
pub fn init_tracing() -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
}
