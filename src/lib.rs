pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod server;

pub use error::{Error, PromptError, Result, UpstreamError};
