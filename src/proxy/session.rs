//! A single proxied transfer.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

use super::transport::{ByteStream, UpstreamResponse};
use crate::config::{DEFAULT_CONTENT_DISPOSITION, DEFAULT_CONTENT_TYPE};
use crate::error_handling::{InfoType, ProcessingStats};

/// Owns one upstream media body for the duration of a proxied request.
///
/// The session is a lazy, finite, forward-only `Stream` of byte chunks, each at
/// most `chunk_size` bytes. The upstream is only polled once the previous
/// frame has been fully handed out. Memory held per session is therefore one
/// upstream frame (whatever size the transport delivered, possibly larger than
/// `chunk_size`) plus zero-copy slices of it.
///
/// The upstream body is released exactly once: when it reports end-of-stream,
/// on the first upstream error, or when the session is dropped early (for
/// example because the downstream client disconnected).
pub struct StreamSession {
    media_url: String,
    content_type: String,
    content_disposition: String,
    body: Option<ByteStream>,
    pending: Bytes,
    chunk_size: usize,
    bytes_relayed: u64,
    stats: Option<Arc<ProcessingStats>>,
}

impl StreamSession {
    pub(super) fn new(
        media_url: String,
        response: UpstreamResponse,
        chunk_size: usize,
        stats: Option<Arc<ProcessingStats>>,
    ) -> Self {
        Self {
            media_url,
            content_type: response
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            content_disposition: response
                .content_disposition
                .unwrap_or_else(|| DEFAULT_CONTENT_DISPOSITION.to_string()),
            body: Some(response.body),
            pending: Bytes::new(),
            chunk_size: chunk_size.max(1),
            bytes_relayed: 0,
            stats,
        }
    }

    /// Upstream `Content-Type`, or `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Upstream `Content-Disposition`, or an attachment with a default filename.
    pub fn content_disposition(&self) -> &str {
        &self.content_disposition
    }

    pub fn bytes_relayed(&self) -> u64 {
        self.bytes_relayed
    }

    /// True once the upstream body has been released.
    pub fn is_released(&self) -> bool {
        self.body.is_none()
    }

    fn release(&mut self, reason: &str) {
        if let Some(body) = self.body.take() {
            drop(body);
            self.pending = Bytes::new();
            log::debug!(
                "Released upstream for {} ({}, {} bytes relayed)",
                self.media_url,
                reason,
                self.bytes_relayed
            );
            if let Some(stats) = &self.stats {
                stats.increment_info(InfoType::StreamReleased);
                stats.add_bytes_relayed(self.bytes_relayed);
            }
        }
    }

    fn next_chunk(&mut self) -> Bytes {
        let chunk = if self.pending.len() > self.chunk_size {
            self.pending.split_to(self.chunk_size)
        } else {
            std::mem::take(&mut self.pending)
        };
        self.bytes_relayed += chunk.len() as u64;
        chunk
    }
}

impl Stream for StreamSession {
    type Item = Result<Bytes, io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if !this.pending.is_empty() {
                return Poll::Ready(Some(Ok(this.next_chunk())));
            }

            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };

            match body.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    this.pending = frame;
                }
                Poll::Ready(Some(Err(e))) => {
                    log::warn!("Upstream error while relaying {}: {}", this.media_url, e);
                    this.release("upstream error");
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    log::info!(
                        "Finished relaying {} ({} bytes)",
                        this.media_url,
                        this.bytes_relayed
                    );
                    this.release("complete");
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if self.body.is_some() {
            log::info!(
                "Relay of {} abandoned after {} bytes",
                self.media_url,
                self.bytes_relayed
            );
        }
        self.release("dropped");
    }
}
