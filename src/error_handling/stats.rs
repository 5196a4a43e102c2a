//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for strategy outcomes,
//! upstream errors, and request-level events.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, OutcomeType};

/// Thread-safe processing statistics tracker.
///
/// All counters are atomics created up front in `new()`, so the maps are never
/// mutated after construction and the struct can be shared across request
/// tasks with `Arc` without any locking.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    outcomes: HashMap<OutcomeType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
    bytes_relayed: AtomicU64,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let errors = ErrorType::iter()
            .map(|error| (error, AtomicUsize::new(0)))
            .collect();
        let outcomes = OutcomeType::iter()
            .map(|outcome| (outcome, AtomicUsize::new(0)))
            .collect();
        let info = InfoType::iter()
            .map(|info_type| (info_type, AtomicUsize::new(0)))
            .collect();

        ProcessingStats {
            errors,
            outcomes,
            info,
            bytes_relayed: AtomicU64::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Increment a strategy outcome counter.
    pub fn increment_outcome(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map.",
                outcome
            );
        }
    }

    /// Increment a request-level counter.
    pub fn increment_info(&self, info: InfoType) {
        if let Some(counter) = self.info.get(&info) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map.",
                info
            );
        }
    }

    pub fn add_bytes_relayed(&self, bytes: u64) {
        self.bytes_relayed.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn get_outcome_count(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info: InfoType) -> usize {
        self.info
            .get(&info)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn bytes_relayed(&self) -> u64 {
        self.bytes_relayed.load(Ordering::Relaxed)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }
}
