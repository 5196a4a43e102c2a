//! Server state and response types.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::{ErrorType, InfoType, OutcomeType, ProcessingStats};
use crate::proxy::StreamProxy;
use crate::resolver::Resolver;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub proxy: Arc<StreamProxy>,
    pub stats: Arc<ProcessingStats>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: Resolver, proxy: StreamProxy, stats: Arc<ProcessingStats>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            proxy: Arc::new(proxy),
            stats,
            start_time: Instant::now(),
        }
    }
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub strategies: Vec<String>,
    pub resolves: ResolveCounts,
    pub outcomes: OutcomeCounts,
    pub streams: StreamCounts,
    pub errors: ErrorCounts,
}

#[derive(Debug, Serialize)]
pub struct ResolveCounts {
    pub requested: usize,
    pub succeeded: usize,
    pub missing_input: usize,
    pub exhausted: usize,
}

#[derive(Debug, Serialize)]
pub struct OutcomeCounts {
    pub found: usize,
    pub not_found: usize,
    pub upstream_error: usize,
}

#[derive(Debug, Serialize)]
pub struct StreamCounts {
    pub opened: usize,
    pub rejected: usize,
    pub upstream_failed: usize,
    pub released: usize,
    pub bytes_relayed: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub timeout: usize,
    pub connection_error: usize,
    pub strategy_panic: usize,
    pub other_error: usize,
}

impl StatusResponse {
    /// Snapshot of the counters in `state`.
    pub fn snapshot(state: &AppState) -> Self {
        let stats = &state.stats;
        let total = stats.total_errors();
        let timeout = stats.get_error_count(ErrorType::HttpRequestTimeoutError);
        let connection_error = stats.get_error_count(ErrorType::HttpRequestConnectError);
        let strategy_panic = stats.get_error_count(ErrorType::StrategyPanic);

        Self {
            uptime_seconds: state.start_time.elapsed().as_secs_f64(),
            strategies: state
                .resolver
                .strategy_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            resolves: ResolveCounts {
                requested: stats.get_info_count(InfoType::ResolveRequested),
                succeeded: stats.get_info_count(InfoType::ResolveSucceeded),
                missing_input: stats.get_info_count(InfoType::ResolveMissingInput),
                exhausted: stats.get_info_count(InfoType::ResolveExhausted),
            },
            outcomes: OutcomeCounts {
                found: stats.get_outcome_count(OutcomeType::Found),
                not_found: stats.get_outcome_count(OutcomeType::NotFound),
                upstream_error: stats.get_outcome_count(OutcomeType::UpstreamError),
            },
            streams: StreamCounts {
                opened: stats.get_info_count(InfoType::StreamOpened),
                rejected: stats.get_info_count(InfoType::StreamRejected),
                upstream_failed: stats.get_info_count(InfoType::StreamUpstreamFailed),
                released: stats.get_info_count(InfoType::StreamReleased),
                bytes_relayed: stats.bytes_relayed(),
            },
            errors: ErrorCounts {
                total,
                timeout,
                connection_error,
                strategy_panic,
                other_error: total
                    .saturating_sub(timeout)
                    .saturating_sub(connection_error)
                    .saturating_sub(strategy_panic),
            },
        }
    }
}
