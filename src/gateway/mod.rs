mod client;
mod normalize;
mod types;

pub use client::*;
pub use normalize::{failure, normalize};
pub use types::*;

use crate::{
    PromptError, Result, UpstreamError,
    config::{Config, FallbackConfig, ForwardMode, PayloadShape, UpstreamConfig},
};
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Validates prompts, forwards them upstream and shapes the reply.
///
/// Holds no per-request state; one instance serves all requests.
pub struct Gateway {
    upstream: UpstreamConfig,
    fallbacks: FallbackConfig,
    client: Arc<dyn UpstreamClient>,
}

impl Gateway {
    pub fn new(config: &Config, client: Arc<dyn UpstreamClient>) -> Self {
        Self {
            upstream: config.upstream.clone(),
            fallbacks: config.fallbacks.clone(),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpUpstreamClient::new(&config.upstream)?;
        info!(
            "Upstream prediction endpoint: {} (mode: {:?})",
            client.predict_url(),
            config.upstream.mode
        );
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn health_enabled(&self) -> bool {
        self.upstream.health_enabled
    }

    /// Pulls the prompt out of an inbound body.
    ///
    /// The value must be a non-empty string; it is returned as sent.
    pub fn extract_prompt(&self, body: &Value) -> std::result::Result<String, PromptError> {
        let key = self.upstream.prompt_field.as_str();
        let object = body.as_object().ok_or(PromptError::NotAnObject)?;

        match object.get(key) {
            None | Some(Value::Null) => Err(PromptError::Missing(key.to_string())),
            Some(Value::String(s)) if s.is_empty() => Err(PromptError::Empty(key.to_string())),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(PromptError::NotAString(key.to_string())),
        }
    }

    pub fn build_payload(&self, prompt: &str) -> Value {
        match self.upstream.payload {
            PayloadShape::Prompt => json!({ "prompt": prompt }),
            PayloadShape::TextWithMetadata => json!({
                "text": prompt,
                "metadata": self.upstream.metadata,
            }),
        }
    }

    pub async fn forward_prompt(&self, prompt: &str) -> PromptOutcome {
        let payload = self.build_payload(prompt);

        match self.client.predict(&payload).await {
            Ok(body) => {
                info!("Upstream prediction succeeded");
                let body = match self.upstream.mode {
                    ForwardMode::Normalize => {
                        PromptBody::Envelope(normalize(prompt, &body, &self.fallbacks))
                    }
                    ForwardMode::Passthrough => PromptBody::Relayed(body),
                };
                PromptOutcome {
                    status: StatusCode::OK,
                    body,
                }
            }
            Err(UpstreamError::Status { status, body }) => {
                warn!("Upstream rejected prediction with {}: {}", status, body);
                PromptOutcome {
                    status,
                    body: PromptBody::Envelope(failure(
                        prompt,
                        self.fallbacks.failure_message.clone(),
                        &self.fallbacks,
                    )),
                }
            }
            Err(UpstreamError::Transport(e)) => {
                error!("Upstream prediction service unreachable: {}", e);
                PromptOutcome {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: PromptBody::Envelope(failure(
                        prompt,
                        format!("Connection error: {}", e),
                        &self.fallbacks,
                    )),
                }
            }
        }
    }

    pub async fn check_health(&self) -> HealthOutcome {
        let (status, body) = match self.client.health().await {
            Ok(agent) => (
                StatusCode::OK,
                HealthEnvelope {
                    status: HealthStatus::Healthy,
                    agent: Some(agent),
                    error: None,
                },
            ),
            Err(e) => {
                let error = match e {
                    UpstreamError::Status { status, .. } => {
                        format!("Upstream returned status {}", status.as_u16())
                    }
                    UpstreamError::Transport(e) => format!("Connection error: {}", e),
                };
                warn!("Upstream health check failed: {}", error);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    HealthEnvelope {
                        status: HealthStatus::Unhealthy,
                        agent: None,
                        error: Some(error),
                    },
                )
            }
        };

        HealthOutcome { status, body }
    }
}
