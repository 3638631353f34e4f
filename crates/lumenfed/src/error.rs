//! SDK error types.

use thiserror::Error;

pub use lumenfed_transport::TransportError;

/// A specialized `Result` type for federation operations.
pub type Result<T> = std::result::Result<T, FederationError>;

/// Represents errors that can occur during discovery and resolution.
///
/// Transport failures (insecure endpoint, size cap, timeout, network) pass
/// through transparently as [`FederationError::Transport`]; nothing is
/// downgraded on the way up.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FederationError {
    /// A transport-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The stellar.toml body is not well-formed TOML. The message carries a
    /// line/column hint.
    #[error("stellar.toml parsing failed: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The resolved stellar.toml has no `FEDERATION_SERVER` string entry.
    #[error("stellar.toml for {domain} does not contain a FEDERATION_SERVER field")]
    MissingFederationServer {
        /// The domain whose document was resolved
        domain: String,
    },

    /// An endpoint URL could not be parsed.
    #[error("invalid federation endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// The offending URL string
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The input is neither a valid account identifier nor a valid
    /// `name*domain` address.
    #[error("invalid account identifier or federation address: {input}")]
    InvalidIdentifier {
        /// The input that failed classification
        input: String,
    },

    /// The federation record carries a `memo` field that is not a string.
    #[error("federation record memo value must be a string")]
    InvalidMemoType,

    /// The federation response body does not have the expected shape.
    #[error("malformed federation response: {0}")]
    InvalidResponse(String),
}
