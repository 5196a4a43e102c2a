//! Streaming proxy handler.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::super::types::AppState;
use crate::config::{DEFAULT_CONTENT_DISPOSITION, DEFAULT_CONTENT_TYPE};

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    url: Option<String>,
}

/// Streams the media at `?url=` back to the caller.
///
/// The response body is the `StreamSession` itself, so a client that
/// disconnects drops the session and with it the upstream connection.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> Response {
    let Some(remote) = params.url.filter(|u| !u.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing url param").into_response();
    };

    let session = match state.proxy.stream(&remote).await {
        Ok(session) => session,
        Err(e) if e.is_input_invalid() => {
            return (StatusCode::BAD_REQUEST, "Invalid url").into_response();
        }
        Err(_) => {
            return (StatusCode::BAD_GATEWAY, "Failed to stream remote file.").into_response();
        }
    };

    let content_type = HeaderValue::from_str(session.content_type())
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let content_disposition = HeaderValue::from_str(session.content_disposition())
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_DISPOSITION));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        Body::from_stream(session),
    )
        .into_response()
}
