use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-facing prediction schema, independent of the upstream's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEnvelope {
    pub input: String,
    pub prediction: String,
    pub confidence: f64,
    pub model_used: String,
    pub reasoning: String,
    pub complexity_score: f64,
    pub processing_time: f64,
    pub complexity_details: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PromptBody {
    Envelope(PredictionEnvelope),
    Relayed(Value),
}

/// Status and body the gateway answers a prompt with.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptOutcome {
    pub status: StatusCode,
    pub body: PromptBody,
}

impl PromptOutcome {
    pub fn envelope(&self) -> Option<&PredictionEnvelope> {
        match &self.body {
            PromptBody::Envelope(envelope) => Some(envelope),
            PromptBody::Relayed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEnvelope {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthOutcome {
    pub status: StatusCode,
    pub body: HealthEnvelope,
}
