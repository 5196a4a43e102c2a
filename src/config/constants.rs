//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including upstream endpoints, timeouts, and streaming parameters.

use std::time::Duration;

/// Default User-Agent string for upstream requests.
///
/// The upstream services refuse obviously automated clients, so every request
/// presents itself as a desktop Chrome browser. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Accept-Language sent when fetching the share page directly
pub const PAGE_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

// Upstream endpoints
/// Third-party unlock service (form POST, HTML response)
pub const DEFAULT_UNLOCK_ENDPOINT: &str = "https://ssstik.io/abc";
/// Third-party mirror/CDN endpoint (GET with `url` query parameter, JSON or HTML response)
pub const DEFAULT_MIRROR_ENDPOINT: &str = "https://www.tikcdn.io/ssstik/";

/// Fixed form fields the unlock service expects next to the `id` field
pub const UNLOCK_FORM_LOCALE: &str = "en";
pub const UNLOCK_FORM_TOKEN: &str = "MzdfRFJk";

// Strategy names (reported back to callers as `method`)
pub const UNLOCK_STRATEGY_NAME: &str = "ssstik.io";
pub const MIRROR_STRATEGY_NAME: &str = "tikcdn.io";
pub const PAGE_STRATEGY_NAME: &str = "tiktok-page-scrape";

// Strategy priorities (ascending = tried first)
pub const UNLOCK_STRATEGY_PRIORITY: u32 = 10;
pub const MIRROR_STRATEGY_PRIORITY: u32 = 20;
pub const PAGE_STRATEGY_PRIORITY: u32 = 30;

// Network operation timeouts
/// Unlock service request timeout (it renders a full HTML page, so it gets the most time)
pub const UNLOCK_TIMEOUT: Duration = Duration::from_secs(20);
pub const MIRROR_TIMEOUT: Duration = Duration::from_secs(15);
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(15);
/// Timeout for opening a proxied media stream (connect + response headers)
pub const STREAM_OPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

// Streaming
/// Maximum size of a single relayed chunk in bytes (8 KiB)
pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;
/// Content-Type used when the upstream does not send one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
/// Content-Disposition used when the upstream does not send one
pub const DEFAULT_CONTENT_DISPOSITION: &str = "attachment; filename=\"video.mp4\"";

// Diagnostics
/// Maximum length of upstream text kept in log lines and error detail (chars)
pub const MAX_DIAGNOSTIC_LENGTH: usize = 500;

// Server defaults
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
/// Path of the streaming proxy endpoint, used when building proxied links
pub const PROXY_PATH: &str = "/proxy";
