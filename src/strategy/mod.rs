//! Upstream resolution strategies.
//!
//! A strategy is one independent way of turning a share link into a direct
//! media URL. Each one owns its upstream call (host, method, headers, timeout)
//! and reports a [`StrategyOutcome`] instead of an error, so the resolver can
//! tell "upstream unreachable" apart from "upstream had nothing for us".
//!
//! Strategies are stateless apart from their shared HTTP client and may be
//! invoked concurrently from any number of request tasks.

mod mirror;
mod page;
mod unlock;
mod upstream;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error_handling::OutcomeType;

pub use mirror::MirrorStrategy;
pub use page::PageScrapeStrategy;
pub use unlock::UnlockServiceStrategy;

/// Result of a single strategy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// A media URL was located.
    Found {
        media_url: String,
        /// Upstream response body, kept for diagnostics only
        raw_body: Option<String>,
    },
    /// The upstream was reachable but produced no usable link.
    NotFound,
    /// The upstream could not be reached (connect, TLS, timeout, body read).
    UpstreamError { detail: String },
}

impl StrategyOutcome {
    pub fn found(media_url: impl Into<String>, raw_body: Option<String>) -> Self {
        StrategyOutcome::Found {
            media_url: media_url.into(),
            raw_body,
        }
    }

    pub fn upstream_error(detail: impl Into<String>) -> Self {
        StrategyOutcome::UpstreamError {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> OutcomeType {
        match self {
            StrategyOutcome::Found { .. } => OutcomeType::Found,
            StrategyOutcome::NotFound => OutcomeType::NotFound,
            StrategyOutcome::UpstreamError { .. } => OutcomeType::UpstreamError,
        }
    }
}

/// One method of resolving a share link.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Name reported to callers as the resolution `method`.
    fn name(&self) -> &str;

    /// Position in the cascade; lower values are tried first.
    fn priority(&self) -> u32;

    /// Attempts to resolve `source_url`. Must not panic on upstream failures.
    async fn invoke(&self, source_url: &str) -> StrategyOutcome;
}

/// The default cascade, in registration order:
/// unlock service, mirror endpoint, direct page scrape.
pub fn default_strategies(client: Arc<reqwest::Client>, config: &Config) -> Vec<Arc<dyn Strategy>> {
    vec![
        Arc::new(UnlockServiceStrategy::new(
            Arc::clone(&client),
            config.unlock_endpoint.clone(),
        )),
        Arc::new(MirrorStrategy::new(
            Arc::clone(&client),
            config.mirror_endpoint.clone(),
        )),
        Arc::new(PageScrapeStrategy::new(client)),
    ]
}
