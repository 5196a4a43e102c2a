//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, proxy)
//! - Upstream failure categorization
//! - Processing statistics tracking (strategy outcomes, errors, request events)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_reqwest_error};
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, OutcomeType, ProxyError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for outcome in OutcomeType::iter() {
            assert_eq!(stats.get_outcome_count(outcome), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
        assert_eq!(stats.bytes_relayed(), 0);
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::StrategyPanic);
        stats.increment_outcome(OutcomeType::NotFound);
        stats.increment_info(InfoType::ResolveExhausted);
        stats.add_bytes_relayed(8192);
        stats.add_bytes_relayed(100);

        assert_eq!(stats.get_error_count(ErrorType::HttpRequestTimeoutError), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.get_outcome_count(OutcomeType::NotFound), 1);
        assert_eq!(stats.get_outcome_count(OutcomeType::Found), 0);
        assert_eq!(stats.get_info_count(InfoType::ResolveExhausted), 1);
        assert_eq!(stats.bytes_relayed(), 8292);
    }

    #[test]
    fn test_proxy_error_input_classification() {
        assert!(ProxyError::InvalidScheme {
            scheme: "ftp".to_string()
        }
        .is_input_invalid());
        assert!(ProxyError::InvalidUrl("nope".to_string()).is_input_invalid());
        assert!(!ProxyError::UpstreamStatus(404).is_input_invalid());
        assert!(!ProxyError::Upstream {
            kind: ErrorType::HttpRequestTimeoutError,
            detail: "timeout".to_string()
        }
        .is_input_invalid());
    }
}
