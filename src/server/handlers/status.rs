//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, StatusResponse};

/// JSON status endpoint with resolve, stream and error counters
pub async fn status_handler(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(StatusResponse::snapshot(&state))).into_response()
}
