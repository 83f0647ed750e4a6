// Logging module for structured logging using the tracing crate

use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for structured logging
///
/// Log level defaults to `info` and can be overridden through the
/// standard `RUST_LOG` environment variable. Output goes to stdout.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()?;
    Ok(())
}
