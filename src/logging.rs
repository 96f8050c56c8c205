use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Builds the log filter from `RUST_LOG` when set, else the configured level.
///
/// Both accept full `EnvFilter` directives such as
/// `prompt_gateway=debug,tower_http=info`.
pub fn build_filter(rust_log: Option<&str>, configured: &str) -> Result<EnvFilter> {
    let directives = rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(configured);

    EnvFilter::try_new(directives)
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Installs the JSON subscriber used by the binary.
pub fn init(configured: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), configured)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))
}
