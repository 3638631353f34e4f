//! Transport error types.

use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Represents errors that can occur while fetching a remote document.
///
/// Every failure is terminal for the call that produced it; retry policy is
/// the caller's responsibility.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// The endpoint uses a plain-HTTP scheme and insecure transport was not
    /// explicitly allowed.
    #[error(
        "Cannot connect to insecure server {url}. \
         Set `allow_http` (per call or via `Config::set_allow_http`) to permit plain HTTP."
    )]
    InsecureTransport {
        /// The rejected endpoint URL
        url: String,
    },

    /// The response body exceeded the size cap for this call site. The
    /// transfer is aborted on the wire; no partial body is surfaced.
    #[error("response exceeds allowed size of {limit} bytes")]
    ResponseTooLarge {
        /// The maximum allowed size in bytes
        limit: usize,
    },

    /// The configured timeout elapsed before the response completed.
    #[error("timeout of {}ms exceeded", timeout.as_millis())]
    Timeout {
        /// The timeout duration that was exceeded
        timeout: Duration,
    },

    /// Any other transport or connection failure, preserving the underlying
    /// cause.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
}
