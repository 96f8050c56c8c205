mod types;

pub use types::*;

use crate::{Error, Result};
use reqwest::Url;
use std::env;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads `.env`, the YAML config file and environment overrides, in that order.
///
/// `CONFIG_PATH` selects the file. When it is unset and `config.yaml` does not
/// exist, built-in defaults are used; an explicitly named file must exist.
pub async fn load() -> Result<Config> {
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from: {}", path.display());
    }

    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => from_yaml(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit_path.is_none() => {
            debug!("No {} found, using built-in defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

pub fn from_yaml(source: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if source.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(source)?)
}

/// Applies environment overrides using `lookup` to read variables.
///
/// Upstream base URL precedence: `MODEL_API_URL`, then `ROUTER_AGENT_URL`,
/// then the file value (which itself defaults to `http://localhost:8000`).
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty("MODEL_API_URL").or_else(|| non_empty("ROUTER_AGENT_URL")) {
        config.upstream.base_url = url;
    }

    if let Some(host) = non_empty("HOST") {
        config.server.host = host;
    }

    if let Some(port) = non_empty("PORT").and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }
}

pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.upstream.base_url).map_err(|e| {
        Error::config(format!(
            "Invalid upstream base_url '{}': {}",
            config.upstream.base_url, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Upstream base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.upstream.request_timeout_secs == 0 || config.upstream.health_timeout_secs == 0 {
        return Err(Error::config("Upstream timeouts must be greater than zero"));
    }

    Ok(())
}
