//! The canonical account record returned by federation queries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FederationError, Result};

/// A federation record: the canonical result of resolving an address,
/// account identifier, or transaction identifier. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationRecord {
    /// The resolved account identifier.
    pub account_id: String,

    /// The `name*domain` address this record belongs to, if the server
    /// reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stellar_address: Option<String>,

    /// Memo type to attach to payments toward this account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,

    /// Memo value; always a string on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Any additional fields the server returned, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FederationRecord {
    /// A record carrying only an account identifier, as produced by the
    /// no-network fast path of [`resolve`](crate::resolve).
    #[must_use]
    pub fn from_account_id(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            stellar_address: None,
            memo_type: None,
            memo: None,
            extra: Map::new(),
        }
    }

    /// Validate and deserialize a federation response body.
    ///
    /// The body must be a JSON object; a `memo` field, if present, must be a
    /// string. Unknown fields pass through into [`Self::extra`].
    pub(crate) fn from_json_bytes(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| FederationError::InvalidResponse(e.to_string()))?;
        let Some(object) = value.as_object() else {
            return Err(FederationError::InvalidResponse(
                "expected a JSON object".to_string(),
            ));
        };
        if let Some(memo) = object.get("memo")
            && !memo.is_string()
        {
            return Err(FederationError::InvalidMemoType);
        }
        serde_json::from_value(value).map_err(|e| FederationError::InvalidResponse(e.to_string()))
    }
}
