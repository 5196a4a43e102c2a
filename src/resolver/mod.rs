//! Resolution cascade.
//!
//! The resolver tries registered strategies strictly one after another in
//! priority order and stops at the first one that finds a media URL. Later
//! strategies are never invoked once an earlier one succeeds.
//!
//! # Failure containment
//!
//! A strategy that panics is treated as having reported `UpstreamError`; the
//! panic is caught here, logged, and the cascade moves on to the next strategy.

mod types;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::strategy::{Strategy, StrategyOutcome};

pub use types::{proxy_link, ResolutionRequest, ResolutionResult, ResolveFailure};

/// Ordered collection of strategies.
#[derive(Default)]
pub struct Resolver {
    strategies: Vec<Arc<dyn Strategy>>,
    stats: Option<Arc<ProcessingStats>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a statistics sink that counts every attempt and result.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Registers a strategy.
    ///
    /// Strategies are kept sorted by ascending priority; the sort is stable,
    /// so equal priorities keep their registration order.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        log::debug!(
            "Registering strategy '{}' (priority {})",
            strategy.name(),
            strategy.priority()
        );
        self.strategies.push(strategy);
        self.strategies.sort_by_key(|s| s.priority());
    }

    /// Strategy names in the order they will be tried.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolves a share link into a direct media URL.
    ///
    /// Empty or whitespace-only input is rejected before any strategy runs.
    /// Otherwise strategies are invoked in order until one returns `Found`;
    /// if none does, the failure names every strategy that was attempted.
    pub async fn resolve(&self, source_url: &str) -> ResolutionResult {
        let request = ResolutionRequest::new(source_url);
        self.count_info(InfoType::ResolveRequested);

        if request.is_empty() {
            log::debug!("Rejecting resolve request with empty input");
            self.count_info(InfoType::ResolveMissingInput);
            return ResolutionResult::missing_input();
        }

        let mut attempted = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let name = strategy.name();
            attempted.push(name.to_string());

            let outcome = self.invoke_guarded(strategy.as_ref(), &request).await;
            if let Some(stats) = &self.stats {
                stats.increment_outcome(outcome.kind());
            }

            match outcome {
                StrategyOutcome::Found { media_url, .. } if !media_url.trim().is_empty() => {
                    let media_url = media_url.trim().to_string();
                    log::info!("Resolved {} via {}: {}", request.source_url, name, media_url);
                    self.count_info(InfoType::ResolveSucceeded);
                    return ResolutionResult::found(name, media_url);
                }
                StrategyOutcome::Found { .. } => {
                    log::warn!("[{}] reported an empty media URL; treating as not found", name);
                }
                StrategyOutcome::NotFound => {
                    log::info!("[{}] found no media URL for {}", name, request.source_url);
                }
                StrategyOutcome::UpstreamError { detail } => {
                    log::warn!("[{}] upstream error for {}: {}", name, request.source_url, detail);
                }
            }
        }

        log::warn!(
            "No strategy produced a link for {} (tried: {})",
            request.source_url,
            attempted.join(", ")
        );
        self.count_info(InfoType::ResolveExhausted);
        ResolutionResult::exhausted(&attempted)
    }

    /// Invokes one strategy, converting a panic into `UpstreamError`.
    async fn invoke_guarded(
        &self,
        strategy: &dyn Strategy,
        request: &ResolutionRequest,
    ) -> StrategyOutcome {
        match AssertUnwindSafe(strategy.invoke(&request.source_url))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!(
                    "[{}] strategy panicked while resolving {}: {}",
                    strategy.name(),
                    request.source_url,
                    message
                );
                if let Some(stats) = &self.stats {
                    stats.increment_error(ErrorType::StrategyPanic);
                }
                StrategyOutcome::upstream_error(format!("{}: {}", ErrorType::StrategyPanic, message))
            }
        }
    }

    fn count_info(&self, info: InfoType) {
        if let Some(stats) = &self.stats {
            stats.increment_info(info);
        }
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
