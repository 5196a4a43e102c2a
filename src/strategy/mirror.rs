//! Mirror strategy: GET against a third-party CDN endpoint that answers with
//! JSON when it can and HTML otherwise.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::upstream::{extract_outcome, fetch_text};
use super::{Strategy, StrategyOutcome};
use crate::config::{MIRROR_STRATEGY_NAME, MIRROR_STRATEGY_PRIORITY, MIRROR_TIMEOUT};

/// JSON pointer to the media URL in the mirror's structured response
const VIDEO_URL_POINTER: &str = "/video/url";

pub struct MirrorStrategy {
    client: Arc<reqwest::Client>,
    endpoint: String,
    timeout: Duration,
}

impl MirrorStrategy {
    pub fn new(client: Arc<reqwest::Client>, endpoint: String) -> Self {
        Self {
            client,
            endpoint,
            timeout: MIRROR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Probes `video.url` in a JSON body.
///
/// Returns `None` when the body is not JSON, the field is missing, or it is
/// not a non-empty string.
fn video_url_from_json(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer(VIDEO_URL_POINTER)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Strategy for MirrorStrategy {
    fn name(&self) -> &str {
        MIRROR_STRATEGY_NAME
    }

    fn priority(&self) -> u32 {
        MIRROR_STRATEGY_PRIORITY
    }

    async fn invoke(&self, source_url: &str) -> StrategyOutcome {
        let request = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .query(&[("url", source_url)]);

        let body = match fetch_text(self.name(), request).await {
            Ok(body) => body,
            Err(outcome) => return outcome,
        };

        match video_url_from_json(&body) {
            Some(media_url) => StrategyOutcome::found(media_url, Some(body)),
            None => extract_outcome(self.name(), body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

    const SOURCE: &str = "https://vm.tiktok.com/ZMabc123/";

    fn strategy_for(server: &Server) -> MirrorStrategy {
        MirrorStrategy::new(Arc::new(reqwest::Client::new()), server.url_str("/ssstik/"))
    }

    #[test]
    fn test_video_url_from_json() {
        assert_eq!(
            video_url_from_json(r#"{"video":{"url":"https://a/b.mp4"}}"#).as_deref(),
            Some("https://a/b.mp4")
        );
        assert_eq!(video_url_from_json(r#"{"video":{"url":""}}"#), None);
        assert_eq!(video_url_from_json(r#"{"video":{"url":42}}"#), None);
        assert_eq!(video_url_from_json(r#"{"video":"https://a/b.mp4"}"#), None);
        assert_eq!(video_url_from_json(r#"["https://a/b.mp4"]"#), None);
        assert_eq!(video_url_from_json("<html></html>"), None);
    }

    #[tokio::test]
    async fn test_mirror_json_field() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ssstik/"),
                request::query(url_decoded(contains(("url", SOURCE)))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "video": {"url": "https://a/b.mp4", "cover": "https://a/c.jpg"}
            }))),
        );

        let outcome = strategy_for(&server).invoke(SOURCE).await;
        match outcome {
            StrategyOutcome::Found { media_url, .. } => assert_eq!(media_url, "https://a/b.mp4"),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mirror_json_without_field_falls_back_to_extractor() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ssstik/")).respond_with(
                json_encoded(serde_json::json!({
                    "data": {"play": "https://cdn.example/fallback.mp4"}
                })),
            ),
        );

        let outcome = strategy_for(&server).invoke(SOURCE).await;
        match outcome {
            StrategyOutcome::Found { media_url, .. } => {
                assert_eq!(media_url, "https://cdn.example/fallback.mp4")
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mirror_html_body_uses_extractor() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ssstik/")).respond_with(
                status_code(200).body(
                    r#"<html><head><meta property="og:video" content="https://cdn.example/og.mp4"></head></html>"#,
                ),
            ),
        );

        let outcome = strategy_for(&server).invoke(SOURCE).await;
        assert_eq!(
            outcome,
            StrategyOutcome::found(
                "https://cdn.example/og.mp4",
                Some(
                    r#"<html><head><meta property="og:video" content="https://cdn.example/og.mp4"></head></html>"#
                        .to_string()
                )
            )
        );
    }

    #[tokio::test]
    async fn test_mirror_json_without_any_link_is_not_found() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ssstik/"))
                .respond_with(json_encoded(serde_json::json!({"error": "not found"}))),
        );

        let outcome = strategy_for(&server).invoke(SOURCE).await;
        assert_eq!(outcome, StrategyOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_mirror_server_error_is_not_found() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ssstik/"))
                .respond_with(status_code(500)),
        );

        let outcome = strategy_for(&server).invoke(SOURCE).await;
        assert_eq!(outcome, StrategyOutcome::NotFound);
    }
}
