//! HTTP client initialization.

use std::sync::Arc;

use crate::config::{Config, MAX_REDIRECT_HOPS};
use reqwest::ClientBuilder;

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS`)
///
/// No client-wide timeout is set: each strategy and the streaming proxy set
/// their own per-request bound, and a client-wide timeout would also cut off
/// long media transfers that are still making progress.
///
/// The client owns the connection pool and is cheap to clone; every strategy
/// and the proxy share the same instance.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_default_config() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }
}
