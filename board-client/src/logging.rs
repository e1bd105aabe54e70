use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{ClientError, Result};

/// Initialize logging for CLI commands.
///
/// Logs go to stderr so listing output on stdout stays pipeable. `RUST_LOG`
/// overrides `level`.
pub fn init_simple_logging(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_line_number(false),
        )
        .try_init()
        .map_err(|e| ClientError::Tracing(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
