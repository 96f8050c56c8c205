use async_trait::async_trait;
use prompt_gateway::{UpstreamError, gateway::UpstreamClient};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock upstream client for testing
#[derive(Debug)]
pub struct MockUpstreamClient {
    pub predict_reply: Result<Value, UpstreamError>,
    pub health_reply: Result<Value, UpstreamError>,
    pub payloads: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self {
            predict_reply: Ok(Value::Object(Default::default())),
            health_reply: Ok(Value::Object(Default::default())),
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_prediction(mut self, body: Value) -> Self {
        self.predict_reply = Ok(body);
        self
    }

    pub fn with_predict_error(mut self, error: UpstreamError) -> Self {
        self.predict_reply = Err(error);
        self
    }

    pub fn with_health(mut self, reply: Result<Value, UpstreamError>) -> Self {
        self.health_reply = reply;
        self
    }

    pub fn get_payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn predict(&self, payload: &Value) -> Result<Value, UpstreamError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.predict_reply.clone()
    }

    async fn health(&self) -> Result<Value, UpstreamError> {
        self.health_reply.clone()
    }
}

impl Default for MockUpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
