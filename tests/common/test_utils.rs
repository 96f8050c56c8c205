use axum::Router;
use prompt_gateway::{
    config::{Config, UpstreamConfig},
    gateway::{Gateway, UpstreamClient},
    server,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test configuration pointing at the given upstream
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 1,
            health_timeout_secs: 1,
            ..UpstreamConfig::default()
        },
        ..Config::default()
    }
}

/// Router backed by a real HTTP upstream client
pub fn create_http_app(config: &Config) -> Router {
    let gateway = Gateway::from_config(config).unwrap();
    server::router(Arc::new(gateway), "does-not-exist")
}

/// Router backed by an arbitrary upstream client
pub fn create_app_with_client(config: &Config, client: Arc<dyn UpstreamClient>) -> Router {
    let gateway = Gateway::new(config, client);
    server::router(Arc::new(gateway), "does-not-exist")
}

/// Static directory holding a landing page
pub fn create_static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><html><body><h1>Prompt Gateway</h1></body></html>",
    )
    .unwrap();
    dir
}

/// Base URL on which nothing is listening
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
