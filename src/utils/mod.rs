//! Small shared helpers.
//!
//! This module provides:
//! - CSS selector parsing with a non-panicking fallback
//! - Sanitizing and truncating upstream text before it reaches logs

pub mod sanitize;
mod selector;

pub use sanitize::truncate_for_log;
pub use selector::parse_selector_with_fallback;
