pub mod handlers;
pub mod types;

use crate::{Result, config::Config, gateway::Gateway};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

/// Builds the application router around an existing gateway.
///
/// `GET /api/health` is only mounted when the gateway has health relaying
/// enabled. Anything outside `/api` is served from `static_dir`.
pub fn router(gateway: Arc<Gateway>, static_dir: impl AsRef<Path>) -> Router {
    let health_enabled = gateway.health_enabled();
    let app_state = handlers::AppState { gateway };

    let mut api = Router::new().route("/api/prompt", post(handlers::prompt));
    if health_enabled {
        api = api.route("/api/health", get(handlers::health));
    }

    let static_dir = static_dir.as_ref();
    let index = static_dir.join("index.html");

    api.with_state(app_state)
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config) -> Result<()> {
    let gateway = Gateway::from_config(&config)?;

    let app = router(Arc::new(gateway), &config.server.static_dir);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
