//! Upstream transport for the streaming proxy.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use url::Url;

use crate::config::STREAM_OPEN_TIMEOUT;
use crate::error_handling::{categorize_reqwest_error, ErrorType, ProxyError};

/// Incremental upstream body. Dropping it releases the underlying connection.
pub type ByteStream = BoxStream<'static, Result<Bytes, io::Error>>;

/// Status, relevant headers and not-yet-read body of an upstream response.
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: ByteStream,
}

/// Opens media URLs for the proxy.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Issues a GET for `url` and returns as soon as response headers arrive.
    async fn open(&self, url: &Url) -> Result<UpstreamResponse, ProxyError>;
}

/// `reqwest`-backed transport sharing the application's connection pool.
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            timeout: STREAM_OPEN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn header_string(headers: &reqwest::header::HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MediaTransport for ReqwestTransport {
    async fn open(&self, url: &Url) -> Result<UpstreamResponse, ProxyError> {
        // The timeout bounds connect + response headers, and then each wait for
        // the next body frame. A whole-request timeout would cut off large
        // transfers that are still making progress.
        let send = self.client.get(url.clone()).send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(ProxyError::Upstream {
                    kind: categorize_reqwest_error(&e),
                    detail: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ProxyError::Upstream {
                    kind: ErrorType::HttpRequestTimeoutError,
                    detail: format!("no response within {:?}", self.timeout),
                })
            }
        };

        let status = response.status().as_u16();
        let content_type = header_string(response.headers(), CONTENT_TYPE);
        let content_disposition = header_string(response.headers(), CONTENT_DISPOSITION);

        let idle_timeout = self.timeout;
        let frames = Box::pin(response.bytes_stream());
        let body = futures::stream::unfold(frames, move |mut frames| async move {
            match tokio::time::timeout(idle_timeout, frames.next()).await {
                Ok(Some(Ok(bytes))) => Some((Ok(bytes), frames)),
                Ok(Some(Err(e))) => Some((Err(io::Error::other(e)), frames)),
                Ok(None) => None,
                Err(_) => Some((
                    Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("upstream stalled for {:?}", idle_timeout),
                    )),
                    frames,
                )),
            }
        })
        .boxed();

        Ok(UpstreamResponse {
            status,
            content_type,
            content_disposition,
            body,
        })
    }
}
