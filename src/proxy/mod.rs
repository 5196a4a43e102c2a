//! Streaming proxy.
//!
//! Relays a remote media file to the caller without buffering it: the
//! upstream is opened with a single GET, its status and headers are checked,
//! and the body is handed out as a [`StreamSession`] that reads it piece by
//! piece.
//!
//! Only `http://` and `https://` URLs are accepted. The check happens before
//! any network call; no further host filtering is done.

mod session;
mod transport;

use std::sync::Arc;

use url::Url;

use crate::config::STREAM_CHUNK_SIZE;
use crate::error_handling::{InfoType, ProcessingStats, ProxyError};

pub use session::StreamSession;
pub use transport::{ByteStream, MediaTransport, ReqwestTransport, UpstreamResponse};

/// Parses `raw` and checks that it uses an http(s) scheme.
pub fn validate_media_url(raw: &str) -> Result<Url, ProxyError> {
    let url = Url::parse(raw.trim()).map_err(|e| ProxyError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProxyError::InvalidScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Opens upstream media URLs and wraps them in [`StreamSession`]s.
pub struct StreamProxy {
    transport: Arc<dyn MediaTransport>,
    chunk_size: usize,
    stats: Option<Arc<ProcessingStats>>,
}

impl StreamProxy {
    pub fn new(transport: Arc<dyn MediaTransport>) -> Self {
        Self {
            transport,
            chunk_size: STREAM_CHUNK_SIZE,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Overrides the maximum chunk size handed to the caller (8 KiB by default).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Opens `media_url` for streaming.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` / `InvalidScheme` before any network activity
    /// - `Upstream` if the request could not be completed
    /// - `UpstreamStatus` if the upstream answered with anything but 200;
    ///   its body is dropped unread
    pub async fn stream(&self, media_url: &str) -> Result<StreamSession, ProxyError> {
        let url = match validate_media_url(media_url) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Rejected proxy request: {}", e);
                self.count_info(InfoType::StreamRejected);
                return Err(e);
            }
        };

        let response = match self.transport.open(&url).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Failed to open {}: {}", url, e);
                self.count_info(InfoType::StreamUpstreamFailed);
                if let (Some(stats), ProxyError::Upstream { kind, .. }) = (&self.stats, &e) {
                    stats.increment_error(*kind);
                }
                return Err(e);
            }
        };

        if response.status != 200 {
            log::warn!("Upstream {} answered HTTP {}", url, response.status);
            self.count_info(InfoType::StreamUpstreamFailed);
            return Err(ProxyError::UpstreamStatus(response.status));
        }

        log::info!("Streaming {}", url);
        self.count_info(InfoType::StreamOpened);
        Ok(StreamSession::new(
            url.to_string(),
            response,
            self.chunk_size,
            self.stats.clone(),
        ))
    }

    fn count_info(&self, info: InfoType) {
        if let Some(stats) = &self.stats {
            stats.increment_info(info);
        }
    }
}
