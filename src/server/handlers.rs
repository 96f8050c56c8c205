use super::types::ErrorResponse;
use crate::gateway::{Gateway, HealthOutcome, PromptOutcome};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

pub async fn prompt(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<PromptOutcome, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();

    handle_prompt(state, body)
        .instrument(info_span!("prompt", %request_id))
        .await
}

async fn handle_prompt(
    state: AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<PromptOutcome, (StatusCode, Json<ErrorResponse>)> {
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected prompt body: {}", rejection.body_text());
        ErrorResponse::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let prompt = state.gateway.extract_prompt(&body).map_err(|e| {
        warn!("Rejected prompt request: {}", e);
        ErrorResponse::bad_request(e.to_string())
    })?;

    info!("Received prompt ({} chars)", prompt.chars().count());

    let outcome = state.gateway.forward_prompt(&prompt).await;
    info!("Responding with status {}", outcome.status);

    Ok(outcome)
}

pub async fn health(State(state): State<AppState>) -> HealthOutcome {
    state.gateway.check_health().await
}
