//! Page scrape strategy: fetch the share link itself and look for an embedded
//! media URL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;

use super::upstream::{extract_outcome, fetch_text};
use super::{Strategy, StrategyOutcome};
use crate::config::{PAGE_ACCEPT_LANGUAGE, PAGE_STRATEGY_NAME, PAGE_STRATEGY_PRIORITY, PAGE_TIMEOUT};

pub struct PageScrapeStrategy {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl PageScrapeStrategy {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            timeout: PAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Strategy for PageScrapeStrategy {
    fn name(&self) -> &str {
        PAGE_STRATEGY_NAME
    }

    fn priority(&self) -> u32 {
        PAGE_STRATEGY_PRIORITY
    }

    async fn invoke(&self, source_url: &str) -> StrategyOutcome {
        // Short links (vm.tiktok.com/...) redirect to the canonical page; the
        // shared client follows them.
        let request = self
            .client
            .get(source_url)
            .timeout(self.timeout)
            .header(ACCEPT_LANGUAGE, PAGE_ACCEPT_LANGUAGE);

        match fetch_text(self.name(), request).await {
            Ok(body) => extract_outcome(self.name(), body),
            Err(outcome) => outcome,
        }
    }
}
