use crate::{Result, UpstreamError, config::UpstreamConfig};
use async_trait::async_trait;
use reqwest::Response;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Sends one prediction request. Never retries.
    async fn predict(&self, payload: &Value) -> std::result::Result<Value, UpstreamError>;

    /// Queries the upstream health endpoint.
    async fn health(&self) -> std::result::Result<Value, UpstreamError>;
}

pub struct HttpUpstreamClient {
    client: reqwest::Client,
    predict_url: String,
    health_url: String,
    request_timeout: Duration,
    health_timeout: Duration,
}

impl HttpUpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("prompt-gateway/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            predict_url: join_url(base_url, &config.predict_path),
            health_url: join_url(base_url, &config.health_path),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            health_timeout: Duration::from_secs(config.health_timeout_secs),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn predict(&self, payload: &Value) -> std::result::Result<Value, UpstreamError> {
        debug!("Forwarding prompt to {}", self.predict_url);

        let response = self
            .client
            .post(&self.predict_url)
            .json(payload)
            .timeout(self.request_timeout)
            .send()
            .await?;

        read_json(response).await
    }

    async fn health(&self) -> std::result::Result<Value, UpstreamError> {
        debug!("Checking upstream health at {}", self.health_url);

        let response = self
            .client
            .get(&self.health_url)
            .timeout(self.health_timeout)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Splits a response into the success body or an [`UpstreamError`].
///
/// An empty success body reads as `{}`; any other unparsable success body
/// counts as a transport failure. A non-success body that is not JSON is
/// kept as `null`.
async fn read_json(response: Response) -> std::result::Result<Value, UpstreamError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }
        return serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::transport(format!("invalid JSON from upstream: {}", e)));
    }

    warn!("Upstream responded with status {}", status);
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Err(UpstreamError::Status { status, body })
}

fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
