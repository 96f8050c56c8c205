use crate::gateway::{HealthOutcome, PromptOutcome};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: error.into(),
            }),
        )
    }
}

impl IntoResponse for PromptOutcome {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for HealthOutcome {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
