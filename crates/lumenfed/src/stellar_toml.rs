//! Well-known stellar.toml lookup.

use lumenfed_transport::{FetchOptions, HttpFetcher};
use tracing::debug;
use url::Url;

use crate::error::{FederationError, Result};

/// Maximum accepted size of a stellar.toml document, in bytes.
pub const STELLAR_TOML_MAX_SIZE: usize = 100 * 1024;

/// Fetches and parses a domain's `/.well-known/stellar.toml`.
#[derive(Debug)]
pub struct TomlResolver;

impl TomlResolver {
    /// Fetch `https://<domain>/.well-known/stellar.toml` (or `http://` when
    /// plain HTTP is allowed) and parse it into a TOML table.
    ///
    /// # Errors
    ///
    /// - [`FederationError::TomlParse`] if the body is not well-formed TOML
    ///   (the message carries a line/column hint)
    /// - [`FederationError::Transport`] for size-cap, timeout, and network
    ///   failures
    pub async fn resolve(domain: &str, options: &FetchOptions) -> Result<toml::Table> {
        let resolved = options.resolve();
        let scheme = if resolved.allow_http { "http" } else { "https" };
        let location = format!("{scheme}://{domain}/.well-known/stellar.toml");
        let url = Url::parse(&location).map_err(|e| FederationError::InvalidEndpoint {
            url: location.clone(),
            reason: e.to_string(),
        })?;

        debug!(domain, %url, "resolving stellar.toml");

        let fetcher = HttpFetcher::new().map_err(FederationError::Transport)?;
        let body = fetcher.get(&url, &resolved, STELLAR_TOML_MAX_SIZE).await?;

        let text = String::from_utf8_lossy(&body);
        let table: toml::Table = text.parse()?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn domain_with_invalid_characters_is_rejected() {
        let err = TomlResolver::resolve("not a domain", &FetchOptions::default())
            .await
            .expect_err("whitespace in domain must fail");
        assert!(matches!(err, FederationError::InvalidEndpoint { .. }));
    }
}
