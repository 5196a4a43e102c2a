//! Unlock service strategy: form POST to a third-party downloader page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::upstream::{extract_outcome, fetch_text};
use super::{Strategy, StrategyOutcome};
use crate::config::{
    UNLOCK_FORM_LOCALE, UNLOCK_FORM_TOKEN, UNLOCK_STRATEGY_NAME, UNLOCK_STRATEGY_PRIORITY,
    UNLOCK_TIMEOUT,
};

/// Posts the share link to the unlock service and scans the returned HTML.
pub struct UnlockServiceStrategy {
    client: Arc<reqwest::Client>,
    endpoint: String,
    timeout: Duration,
}

impl UnlockServiceStrategy {
    pub fn new(client: Arc<reqwest::Client>, endpoint: String) -> Self {
        Self {
            client,
            endpoint,
            timeout: UNLOCK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Strategy for UnlockServiceStrategy {
    fn name(&self) -> &str {
        UNLOCK_STRATEGY_NAME
    }

    fn priority(&self) -> u32 {
        UNLOCK_STRATEGY_PRIORITY
    }

    async fn invoke(&self, source_url: &str) -> StrategyOutcome {
        // .form() sets Content-Type: application/x-www-form-urlencoded
        let request = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&[
                ("id", source_url),
                ("locale", UNLOCK_FORM_LOCALE),
                ("tt", UNLOCK_FORM_TOKEN),
            ]);

        match fetch_text(self.name(), request).await {
            Ok(body) => extract_outcome(self.name(), body),
            Err(outcome) => outcome,
        }
    }
}
