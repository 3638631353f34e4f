//! Bounded-size secure GET.
//!
//! One helper performs every outbound request in the SDK under three
//! simultaneous constraints: transport security (no plain HTTP unless
//! explicitly allowed), a byte-size cap enforced on the wire as chunks
//! arrive, and an effective timeout covering the whole exchange. The size
//! cap aborts the transfer mid-stream by dropping the response, closing the
//! underlying connection, so worst-case memory stays bounded regardless of
//! server behavior.

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::ResolvedFetchOptions;
use crate::error::{TransportError, TransportResult};
use crate::server_time::{ServerTimeCache, unix_now_secs};

const CLIENT_NAME: &str = "lumenfed";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP fetcher shared by every network-issuing operation in the SDK.
///
/// Owns one `reqwest` client and the [`ServerTimeCache`] it feeds. Cloning
/// is cheap; clones share both.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    server_times: Arc<ServerTimeCache>,
}

impl HttpFetcher {
    /// Create a fetcher feeding the process-wide [`ServerTimeCache::shared`]
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> TransportResult<Self> {
        Self::with_server_time_cache(ServerTimeCache::shared())
    }

    /// Create a fetcher feeding a caller-owned [`ServerTimeCache`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be
    /// constructed.
    pub fn with_server_time_cache(server_times: Arc<ServerTimeCache>) -> TransportResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Client-Name", HeaderValue::from_static(CLIENT_NAME));
        headers.insert("X-Client-Version", HeaderValue::from_static(CLIENT_VERSION));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            server_times,
        })
    }

    /// Perform one GET against `url`, capping the response body at
    /// `max_size` bytes.
    ///
    /// # Errors
    ///
    /// - [`TransportError::InsecureTransport`] before any I/O if `url` is not
    ///   `https` and the options do not allow plain HTTP
    /// - [`TransportError::Timeout`] if the effective timeout elapses first
    /// - [`TransportError::ResponseTooLarge`] once more than `max_size` bytes
    ///   arrive; the transfer is aborted at that point
    /// - [`TransportError::Network`] for any other transport failure,
    ///   including non-success status codes
    pub async fn get(
        &self,
        url: &Url,
        options: &ResolvedFetchOptions,
        max_size: usize,
    ) -> TransportResult<Bytes> {
        if url.scheme() != "https" && !options.allow_http {
            return Err(TransportError::InsecureTransport {
                url: url.to_string(),
            });
        }

        debug!(%url, max_size, timeout = ?options.timeout, "fetching");

        match options.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.get_bounded(url, max_size))
                .await
                .map_err(|_| TransportError::Timeout { timeout })?,
            None => self.get_bounded(url, max_size).await,
        }
    }

    async fn get_bounded(&self, url: &Url, max_size: usize) -> TransportResult<Bytes> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;

        self.record_server_time(url, response.headers());

        // Trust Content-Length only to fail early; the streaming cap below is
        // what actually bounds the transfer.
        if let Some(length) = response.content_length()
            && length > max_size as u64
        {
            return Err(TransportError::ResponseTooLarge { limit: max_size });
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > max_size {
                warn!(%url, limit = max_size, "response exceeded size cap, aborting transfer");
                // Dropping the stream closes the connection.
                return Err(TransportError::ResponseTooLarge { limit: max_size });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    fn record_server_time(&self, url: &Url, headers: &HeaderMap) {
        let Some(hostname) = url.host_str() else {
            return;
        };
        let Some(date) = headers.get(header::DATE).and_then(|v| v.to_str().ok()) else {
            return;
        };
        self.server_times.record(hostname, date, unix_now_secs());
    }

    /// The server-time cache this fetcher records into.
    #[must_use]
    pub fn server_times(&self) -> &Arc<ServerTimeCache> {
        &self.server_times
    }
}
