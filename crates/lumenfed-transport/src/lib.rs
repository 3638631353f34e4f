//! # lumenfed-transport
//!
//! Policy-enforcing HTTP fetch layer for the lumenfed SDK.
//!
//! Everything the SDK sends over the network goes through [`HttpFetcher`],
//! which enforces three policies on every request:
//!
//! - **Transport security**: plain-HTTP endpoints are rejected before any
//!   I/O unless explicitly allowed, per call or via the process-wide
//!   [`Config`]
//! - **Size caps**: response bodies are bounded on the wire; a transfer is
//!   aborted (connection closed) the moment it exceeds the cap for its call
//!   site, so no partial document ever reaches a parser
//! - **Timeouts**: the effective timeout (per-call override, else global
//!   default) covers the whole exchange and aborts the in-flight request
//!   when it fires
//!
//! As a side effect, every successful response's `Date` header updates a
//! [`ServerTimeCache`], from which the current wall-clock time of a remote
//! host can be extrapolated for up to five minutes.
//!
//! There are no retries and no partial results: the first failure is
//! terminal for that call.

mod config;
mod error;
mod fetch;
mod server_time;

pub use config::{Config, FetchOptions, ResolvedFetchOptions};
pub use error::{TransportError, TransportResult};
pub use fetch::HttpFetcher;
pub use server_time::{SERVER_TIME_FRESHNESS, ServerTimeCache, ServerTimeEntry};
