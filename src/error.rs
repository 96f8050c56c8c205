use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure of a single upstream exchange.
///
/// The two variants are the two failure classes a caller must keep apart:
/// the upstream answered with a non-success status, or no usable answer
/// arrived at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("upstream returned status {status}")]
    Status { status: StatusCode, body: Value },

    #[error("{0}")]
    Transport(String),
}

impl UpstreamError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Rejection of an inbound prompt body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field '{0}'")]
    Missing(String),

    #[error("Field '{0}' must be a string")]
    NotAString(String),

    #[error("Field '{0}' must not be empty")]
    Empty(String),
}
