//! Identifier classification and the `resolve` entry point.

use lumenfed_transport::FetchOptions;
use tracing::debug;

use crate::error::{FederationError, Result};
use crate::federation::FederationServer;
use crate::record::FederationRecord;
use crate::strkey;

/// The outcome of classifying an input string, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    /// A syntactically valid account identifier, resolvable without any
    /// network call.
    AccountId(&'a str),

    /// A `name*domain` federation address.
    Address {
        /// The part before the separator
        name: &'a str,
        /// The part after the separator
        domain: &'a str,
    },

    /// Neither of the above.
    Invalid,
}

/// Classify an input string as an account identifier, a federation address,
/// or invalid. Pure and synchronous.
#[must_use]
pub fn classify(input: &str) -> Identifier<'_> {
    if strkey::is_valid_account_id(input) {
        return Identifier::AccountId(input);
    }
    let mut parts = input.split('*');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(domain), None) if !name.is_empty() && !domain.is_empty() => {
            Identifier::Address { name, domain }
        }
        _ => Identifier::Invalid,
    }
}

/// Resolve an arbitrary identifier into a federation record.
///
/// A valid account identifier is returned directly without touching the
/// network. A valid `name*domain` address triggers domain discovery
/// ([`FederationServer::for_domain`]) followed by an address resolution
/// against the discovered endpoint. Anything else fails with
/// [`FederationError::InvalidIdentifier`]. Discovery and resolution
/// failures propagate unchanged.
pub async fn resolve(input: &str, options: &FetchOptions) -> Result<FederationRecord> {
    match classify(input) {
        Identifier::AccountId(account_id) => {
            debug!(input, "input is an account identifier, no lookup needed");
            Ok(FederationRecord::from_account_id(account_id))
        }
        Identifier::Address { domain, .. } => {
            let server = FederationServer::for_domain(domain, options).await?;
            server.resolve_address(input).await
        }
        Identifier::Invalid => Err(FederationError::InvalidIdentifier {
            input: input.to_string(),
        }),
    }
}
