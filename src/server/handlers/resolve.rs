//! Resolve handlers (HTML form, HTML result, JSON API).

use std::panic::AssertUnwindSafe;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use futures::FutureExt;
use serde::Deserialize;

use super::super::page::render_page;
use super::super::types::AppState;
use crate::resolver::{panic_message, ResolutionResult};

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    url: Option<String>,
    /// Any value (the HTML checkbox sends "on") requests a proxy link.
    proxy: Option<String>,
}

/// Runs the resolver, turning a panic anywhere below into an internal failure.
async fn resolve_guarded(state: &AppState, source_url: &str) -> ResolutionResult {
    match AssertUnwindSafe(state.resolver.resolve(source_url))
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Resolver panicked for {}: {}", source_url, message);
            ResolutionResult::internal(message)
        }
    }
}

fn status_code(result: &ResolutionResult) -> StatusCode {
    StatusCode::from_u16(result.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Empty form
pub async fn index_handler() -> Html<String> {
    Html(render_page(None))
}

/// HTML result page
pub async fn download_handler(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Response {
    let source_url = params.url.unwrap_or_default();
    let mut result = resolve_guarded(&state, &source_url).await;
    if params.proxy.is_some() {
        result = result.with_proxy_link();
    }
    (status_code(&result), Html(render_page(Some(&result)))).into_response()
}

/// JSON API; never includes a proxy link
pub async fn api_download_handler(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Response {
    let source_url = params.url.unwrap_or_default();
    let result = resolve_guarded(&state, &source_url).await;
    (status_code(&result), Json(result)).into_response()
}
