//! Federation protocol client.

use lumenfed_transport::{FetchOptions, HttpFetcher, ResolvedFetchOptions, TransportError};
use tracing::debug;
use url::Url;

use crate::error::{FederationError, Result};
use crate::record::FederationRecord;
use crate::stellar_toml::TomlResolver;

/// Maximum accepted size of a federation response, in bytes.
pub const FEDERATION_RESPONSE_MAX_SIZE: usize = 100 * 1024;

/// A client bound to one federation endpoint and the domain it serves.
///
/// The endpoint's scheme is validated against the transport-security policy
/// at construction; an insecure endpoint fails synchronously, before any
/// asynchronous work begins. Endpoint, domain, and the resolved options are
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct FederationServer {
    server_url: Url,
    domain: String,
    options: ResolvedFetchOptions,
    fetcher: HttpFetcher,
}

impl FederationServer {
    /// Bind a client to `server_url` for `domain`.
    ///
    /// # Errors
    ///
    /// - [`FederationError::InvalidEndpoint`] if `server_url` does not parse
    /// - [`FederationError::Transport`] with
    ///   [`TransportError::InsecureTransport`] if the scheme is not `https`
    ///   and plain HTTP is not allowed by `options` or the global config
    pub fn new(server_url: &str, domain: &str, options: &FetchOptions) -> Result<Self> {
        let url = Url::parse(server_url).map_err(|e| FederationError::InvalidEndpoint {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        let resolved = options.resolve();
        if url.scheme() != "https" && !resolved.allow_http {
            return Err(TransportError::InsecureTransport {
                url: url.to_string(),
            }
            .into());
        }
        let fetcher = HttpFetcher::new().map_err(FederationError::Transport)?;
        Ok(Self {
            server_url: url,
            domain: domain.to_string(),
            options: resolved,
            fetcher,
        })
    }

    /// Discover `domain`'s federation endpoint through its stellar.toml and
    /// bind a client to it.
    ///
    /// # Errors
    ///
    /// Fails with [`FederationError::MissingFederationServer`] when the
    /// document has no `FEDERATION_SERVER` string entry; TOML and transport
    /// failures propagate unchanged.
    pub async fn for_domain(domain: &str, options: &FetchOptions) -> Result<Self> {
        let document = TomlResolver::resolve(domain, options).await?;
        let endpoint = document
            .get("FEDERATION_SERVER")
            .and_then(toml::Value::as_str)
            .ok_or_else(|| FederationError::MissingFederationServer {
                domain: domain.to_string(),
            })?;
        debug!(domain, endpoint, "discovered federation endpoint");
        Self::new(endpoint, domain, options)
    }

    /// The endpoint this client queries.
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// The domain this client was discovered for or explicitly bound to.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Resolve a `name*domain` address into a federation record.
    ///
    /// The address must contain exactly one `*` with both sides non-empty;
    /// it is sent whole as the query value.
    ///
    /// # Errors
    ///
    /// [`FederationError::InvalidIdentifier`] for malformed addresses;
    /// otherwise the shared query failure modes (transport, memo typing,
    /// response shape).
    pub async fn resolve_address(&self, address: &str) -> Result<FederationRecord> {
        let mut parts = address.split('*');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(domain), None) if !name.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(FederationError::InvalidIdentifier {
                    input: address.to_string(),
                });
            }
        }
        self.query("name", address).await
    }

    /// Resolve a raw account identifier into a federation record.
    pub async fn resolve_account_id(&self, account_id: &str) -> Result<FederationRecord> {
        self.query("id", account_id).await
    }

    /// Resolve a transaction identifier into a federation record.
    pub async fn resolve_transaction_id(&self, transaction_id: &str) -> Result<FederationRecord> {
        self.query("txid", transaction_id).await
    }

    async fn query(&self, kind: &str, q: &str) -> Result<FederationRecord> {
        let mut url = self.server_url.clone();
        url.query_pairs_mut()
            .append_pair("type", kind)
            .append_pair("q", q);

        debug!(%url, kind, "federation query");

        let body = self
            .fetcher
            .get(&url, &self.options, FEDERATION_RESPONSE_MAX_SIZE)
            .await?;
        FederationRecord::from_json_bytes(&body)
    }
}
