//! Shared upstream call handling for strategies.

use reqwest::{RequestBuilder, StatusCode};

use super::StrategyOutcome;
use crate::error_handling::describe_reqwest_error;
use crate::utils::truncate_for_log;

/// Sends `request` and returns the body text of a 200 response.
///
/// Every other result is mapped to the outcome the strategy should report:
/// - network failure (connect, TLS, timeout) or body read failure → `UpstreamError`
/// - any non-200 status → `NotFound`
pub(super) async fn fetch_text(
    strategy: &str,
    request: RequestBuilder,
) -> Result<String, StrategyOutcome> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let detail = describe_reqwest_error(&e);
            log::debug!("[{}] request failed: {}", strategy, detail);
            return Err(StrategyOutcome::upstream_error(detail));
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        log::debug!("[{}] upstream responded with {}", strategy, status);
        return Err(StrategyOutcome::NotFound);
    }

    match response.text().await {
        Ok(body) => {
            log::trace!(
                "[{}] received {} bytes: {}",
                strategy,
                body.len(),
                truncate_for_log(&body)
            );
            Ok(body)
        }
        Err(e) => {
            let detail = describe_reqwest_error(&e);
            log::debug!("[{}] failed to read body: {}", strategy, detail);
            Err(StrategyOutcome::upstream_error(detail))
        }
    }
}

/// Runs the shared extractor over `body`, producing `Found` or `NotFound`.
pub(super) fn extract_outcome(strategy: &str, body: String) -> StrategyOutcome {
    match crate::extract::extract_media_url(&body) {
        Some(media_url) => StrategyOutcome::found(media_url, Some(body)),
        None => {
            log::debug!(
                "[{}] no media URL in response: {}",
                strategy,
                truncate_for_log(&body)
            );
            StrategyOutcome::NotFound
        }
    }
}
