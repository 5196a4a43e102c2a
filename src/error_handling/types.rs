//! Error type definitions.
//!
//! This module defines the error types and the counter categories used
//! throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Configuration rejected by `Config::validate`.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures of the streaming proxy.
///
/// `InvalidScheme` and `InvalidUrl` are input-validation failures raised before
/// any network call; the others describe the upstream fetch.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The media URL does not use http:// or https://.
    #[error("Invalid url scheme '{scheme}' (only http:// and https:// allowed)")]
    InvalidScheme { scheme: String },

    /// The media URL could not be parsed at all.
    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    /// The upstream could not be reached or the request failed.
    #[error("Upstream fetch failed: {detail}")]
    Upstream { kind: ErrorType, detail: String },

    /// The upstream answered with a status other than 200.
    #[error("Upstream responded with HTTP {0}")]
    UpstreamStatus(u16),
}

impl ProxyError {
    /// Returns true for failures caused by the caller's input rather than the upstream.
    pub fn is_input_invalid(&self) -> bool {
        matches!(
            self,
            ProxyError::InvalidScheme { .. } | ProxyError::InvalidUrl(_)
        )
    }
}

/// Categories of upstream network failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRequestError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    /// A strategy panicked; caught at the resolver boundary
    StrategyPanic,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout",
            ErrorType::HttpRequestConnectError => "HTTP connection error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP response body error",
            ErrorType::HttpRequestDecodeError => "HTTP response decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::StrategyPanic => "Strategy panicked",
        }
    }
}

/// Per-attempt outcome categories, counted once per strategy invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    Found,
    NotFound,
    UpstreamError,
}

/// Request-level counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    ResolveRequested,
    ResolveSucceeded,
    ResolveMissingInput,
    ResolveExhausted,
    StreamOpened,
    StreamRejected,
    StreamUpstreamFailed,
    StreamReleased,
}
