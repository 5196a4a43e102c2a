//! Resolution request/result types.

use serde::Serialize;

use crate::config::PROXY_PATH;

/// Input of a single resolve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub source_url: String,
}

impl ResolutionRequest {
    /// Builds a request from free text, trimming surrounding whitespace.
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source_url.is_empty()
    }
}

/// Why a resolve call failed; drives the HTTP status chosen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// Empty or whitespace-only input
    MissingInput,
    /// Every strategy reported `NotFound` or `UpstreamError`
    Exhausted,
    /// Unexpected failure outside any strategy
    Internal,
}

/// Outcome of a resolve call, as rendered to callers.
///
/// `success` is true exactly when `media_url` holds a non-empty link; on
/// failure `error` is set instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip)]
    pub failure: Option<ResolveFailure>,
}

impl ResolutionResult {
    pub fn found(method: &str, media_url: String) -> Self {
        Self {
            success: true,
            method: Some(method.to_string()),
            media_url: Some(media_url),
            proxy_url: None,
            error: None,
            detail: None,
            failure: None,
        }
    }

    pub fn missing_input() -> Self {
        Self::failed(ResolveFailure::MissingInput, "No URL provided", None)
    }

    /// All strategies failed; `attempted` lists their names in the order tried.
    pub fn exhausted(attempted: &[String]) -> Self {
        let detail = if attempted.is_empty() {
            "No strategies are registered.".to_string()
        } else {
            format!(
                "Tried {}. If this keeps failing, the target site may block automated requests.",
                attempted.join(", ")
            )
        };
        Self::failed(
            ResolveFailure::Exhausted,
            "Could not find a downloadable MP4 link",
            Some(detail),
        )
    }

    pub fn internal(detail: String) -> Self {
        Self::failed(ResolveFailure::Internal, "Server error", Some(detail))
    }

    fn failed(failure: ResolveFailure, error: &str, detail: Option<String>) -> Self {
        Self {
            success: false,
            method: None,
            media_url: None,
            proxy_url: None,
            error: Some(error.to_string()),
            detail,
            failure: Some(failure),
        }
    }

    /// Attaches a link to this service's streaming proxy for the resolved media.
    /// No-op on failed results.
    pub fn with_proxy_link(mut self) -> Self {
        if let Some(media_url) = &self.media_url {
            self.proxy_url = Some(proxy_link(media_url));
        }
        self
    }

    /// HTTP status the presentation layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self.failure {
            None => 200,
            Some(ResolveFailure::MissingInput) => 400,
            Some(ResolveFailure::Exhausted) => 502,
            Some(ResolveFailure::Internal) => 500,
        }
    }
}

/// Builds `/proxy?url=<encoded media url>`.
pub fn proxy_link(media_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(media_url.as_bytes()).collect();
    format!("{}?url={}", PROXY_PATH, encoded)
}
