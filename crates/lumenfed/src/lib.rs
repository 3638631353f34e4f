//! # lumenfed
//!
//! Federation address discovery and resolution.
//!
//! The SDK turns a human-friendly identifier (a `name*domain` federation
//! address, a raw account identifier, or a transaction identifier) into a
//! canonical [`FederationRecord`] by following a two-hop discovery
//! protocol: fetch the domain's `/.well-known/stellar.toml`, extract its
//! `FEDERATION_SERVER` endpoint, then query that endpoint.
//!
//! ## Security policy
//!
//! Every outbound request enforces three constraints (see
//! [`lumenfed_transport`]):
//!
//! - Plain-HTTP endpoints are rejected at [`FederationServer`] construction
//!   time, before any I/O, unless explicitly allowed per call or via the
//!   global [`Config`]
//! - Response bodies are capped ([`STELLAR_TOML_MAX_SIZE`],
//!   [`FEDERATION_RESPONSE_MAX_SIZE`]); a transfer is aborted on the wire
//!   the moment it exceeds the cap
//! - The effective timeout (per-call, else global default) aborts the
//!   in-flight request when it fires
//!
//! Failures are terminal for the call that produced them: no retries, no
//! partial results, no downgrading of error kinds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lumenfed::{FetchOptions, resolve};
//!
//! # async fn example() -> lumenfed::Result<()> {
//! // Raw account identifiers short-circuit without a network call.
//! let record = resolve(
//!     "GAFSZ3VPBC2H2DVKCEWLN3PQWZW6BVDMFROWJUDAJ3KWSOKQIJ4R5W4J",
//!     &FetchOptions::default(),
//! )
//! .await?;
//! assert!(record.stellar_address.is_none());
//!
//! // Addresses go through stellar.toml discovery plus a federation query.
//! let record = resolve("bob*example.org", &FetchOptions::default()).await?;
//! println!("account: {}", record.account_id);
//! # Ok(())
//! # }
//! ```
//!
//! Callers that already know a domain's endpoint can construct a
//! [`FederationServer`] directly, or discover one with
//! [`FederationServer::for_domain`].

mod error;
mod federation;
mod record;
mod resolver;
mod stellar_toml;
mod strkey;

pub use error::{FederationError, Result};
pub use federation::{FEDERATION_RESPONSE_MAX_SIZE, FederationServer};
pub use record::FederationRecord;
pub use resolver::{Identifier, classify, resolve};
pub use stellar_toml::{STELLAR_TOML_MAX_SIZE, TomlResolver};
pub use strkey::is_valid_account_id;

pub use lumenfed_transport::{
    Config, FetchOptions, HttpFetcher, ServerTimeCache, TransportError, TransportResult,
};
