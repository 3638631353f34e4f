//! Process-wide transport configuration and per-call options.
//!
//! `Config` holds two process-wide values: whether plain-HTTP endpoints are
//! acceptable, and a default request timeout. Network-issuing operations read
//! it at call time through [`FetchOptions::resolve`], so updates affect calls
//! issued afterwards but never calls already in flight.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::time::Duration;

static GLOBAL_CONFIG: Lazy<RwLock<ConfigState>> = Lazy::new(|| RwLock::new(ConfigState::default()));

#[derive(Debug, Clone, Copy)]
struct ConfigState {
    allow_http: bool,
    timeout: Option<Duration>,
}

impl Default for ConfigState {
    fn default() -> Self {
        // Safe defaults: secure transport only, no request timeout.
        Self {
            allow_http: false,
            timeout: None,
        }
    }
}

/// Accessors for the process-wide transport configuration.
///
/// Mirrors the "global default, per-call override" contract: every value here
/// can be overridden per call through [`FetchOptions`].
#[derive(Debug)]
pub struct Config;

impl Config {
    /// Allow or forbid plain-HTTP endpoints process-wide.
    pub fn set_allow_http(allow: bool) {
        GLOBAL_CONFIG.write().allow_http = allow;
    }

    /// Whether plain-HTTP endpoints are currently allowed.
    pub fn is_allow_http() -> bool {
        GLOBAL_CONFIG.read().allow_http
    }

    /// Set the default timeout applied to every network call that does not
    /// carry its own.
    pub fn set_timeout(timeout: Duration) {
        GLOBAL_CONFIG.write().timeout = Some(timeout);
    }

    /// The current default timeout, if one is set.
    pub fn timeout() -> Option<Duration> {
        GLOBAL_CONFIG.read().timeout
    }

    /// Reset both values to their safe defaults: secure-only transport, no
    /// timeout.
    pub fn set_default() {
        *GLOBAL_CONFIG.write() = ConfigState::default();
    }
}

/// Per-call transport options.
///
/// Unset fields fall back to the global [`Config`] values at the moment the
/// call is issued.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Allow plain-HTTP endpoints for this call. `None` defers to
    /// [`Config::is_allow_http`].
    pub allow_http: Option<bool>,

    /// Timeout for this call. `None` defers to [`Config::timeout`].
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Options that permit plain-HTTP endpoints.
    #[must_use]
    pub fn allowing_http() -> Self {
        Self {
            allow_http: Some(true),
            timeout: None,
        }
    }

    /// Set the per-call timeout, overriding the global default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve against the global [`Config`], yielding the effective values
    /// for one call.
    #[must_use]
    pub fn resolve(&self) -> ResolvedFetchOptions {
        ResolvedFetchOptions {
            allow_http: self.allow_http.unwrap_or_else(Config::is_allow_http),
            timeout: self.timeout.or_else(Config::timeout),
        }
    }
}

/// The effective transport options for one call, with global fallbacks
/// already applied. Immutable once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFetchOptions {
    /// Whether plain-HTTP endpoints are acceptable.
    pub allow_http: bool,

    /// Effective timeout, if any.
    pub timeout: Option<Duration>,
}
