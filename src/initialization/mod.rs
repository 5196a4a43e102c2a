//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client (one connection pool for every strategy and the proxy)
//! - Resolver with the default strategy cascade
//! - Streaming proxy
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use crate::config::Config;
use crate::error_handling::{InitializationError, ProcessingStats};
use crate::proxy::{ReqwestTransport, StreamProxy};
use crate::resolver::Resolver;
use crate::strategy::default_strategies;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Builds the resolver with the three default strategies registered.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Configuration providing the upstream endpoints
/// * `stats` - Statistics sink shared with the server
pub fn init_resolver(
    client: Arc<reqwest::Client>,
    config: &Config,
    stats: Arc<ProcessingStats>,
) -> Resolver {
    let mut resolver = Resolver::new().with_stats(stats);
    for strategy in default_strategies(client, config) {
        resolver.register(strategy);
    }
    resolver
}

/// Builds the streaming proxy on top of the shared HTTP client.
pub fn init_stream_proxy(client: Arc<reqwest::Client>, stats: Arc<ProcessingStats>) -> StreamProxy {
    StreamProxy::new(Arc::new(ReqwestTransport::new(client))).with_stats(stats)
}

/// Validates the configuration and builds every shared resource.
///
/// # Errors
///
/// Returns `InitializationError::InvalidConfig` if validation fails, or
/// `InitializationError::HttpClientError` if the HTTP client cannot be built.
pub fn init_app_state(config: &Config) -> Result<crate::server::AppState, InitializationError> {
    config.validate().map_err(InitializationError::InvalidConfig)?;

    let client = init_client(config)?;
    let stats = Arc::new(ProcessingStats::new());
    let resolver = init_resolver(Arc::clone(&client), config, Arc::clone(&stats));
    let proxy = init_stream_proxy(client, Arc::clone(&stats));

    Ok(crate::server::AppState::new(resolver, proxy, stats))
}
