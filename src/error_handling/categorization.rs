//! Error categorization.
//!
//! Maps `reqwest` failures onto `ErrorType` so upstream errors can be counted
//! and described consistently across strategies and the proxy.

use super::types::ErrorType;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Timeouts are checked before connect errors: a connect timeout reports both,
/// and callers care more that the bounded wait elapsed.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Formats an upstream failure as `"<category>: <error>"`.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    format!("{}: {}", categorize_reqwest_error(error), error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_categorize_connect_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("connection to a closed port should fail");
        let category = categorize_reqwest_error(&err);
        assert!(
            matches!(
                category,
                ErrorType::HttpRequestConnectError | ErrorType::HttpRequestRequestError
            ),
            "unexpected category {:?}",
            category
        );
    }

    #[tokio::test]
    async fn test_categorize_builder_error() {
        let client = reqwest::Client::new();
        let err = client
            .get("not a url")
            .send()
            .await
            .expect_err("invalid URL should fail to build");
        assert_eq!(
            categorize_reqwest_error(&err),
            ErrorType::HttpRequestBuilderError
        );
        assert!(describe_reqwest_error(&err).starts_with("HTTP request builder error: "));
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(
            ErrorType::HttpRequestTimeoutError.to_string(),
            "HTTP request timeout"
        );
        assert_eq!(ErrorType::StrategyPanic.to_string(), "Strategy panicked");
    }
}
