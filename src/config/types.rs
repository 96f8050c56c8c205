use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub fallbacks: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default)]
    pub mode: ForwardMode,
    #[serde(default)]
    pub prompt_field: PromptField,
    #[serde(default)]
    pub payload: PayloadShape,
    #[serde(default = "default_metadata")]
    pub metadata: Map<String, Value>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
    #[serde(default = "default_health_enabled")]
    pub health_enabled: bool,
}

/// What the gateway hands back on an upstream success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardMode {
    /// Reshape the upstream body into the prediction envelope.
    #[default]
    Normalize,
    /// Relay the upstream body untouched.
    Passthrough,
}

/// Inbound JSON key holding the user's prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptField {
    #[default]
    Prompt,
    Text,
}

impl PromptField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Text => "text",
        }
    }
}

/// Shape of the JSON body sent upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{"prompt": ...}`
    #[default]
    Prompt,
    /// `{"text": ..., "metadata": {...}}`
    TextWithMetadata,
}

/// Values substituted for anything the upstream did not provide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_prediction")]
    pub prediction: String,
    #[serde(default = "default_model_used")]
    pub model_used: String,
    #[serde(default = "default_failure_model_used")]
    pub failure_model_used: String,
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            health_path: default_health_path(),
            mode: ForwardMode::default(),
            prompt_field: PromptField::default(),
            payload: PayloadShape::default(),
            metadata: default_metadata(),
            request_timeout_secs: default_request_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            health_enabled: default_health_enabled(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            prediction: default_prediction(),
            model_used: default_model_used(),
            failure_model_used: default_failure_model_used(),
            failure_message: default_failure_message(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("source".to_string(), json!("web"));
    metadata
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_health_enabled() -> bool {
    true
}

fn default_prediction() -> String {
    "Unknown".to_string()
}

fn default_model_used() -> String {
    "unknown".to_string()
}

fn default_failure_model_used() -> String {
    "none".to_string()
}

fn default_failure_message() -> String {
    "Failed to process request".to_string()
}
