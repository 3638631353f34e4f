//! Last-observed server time per hostname.
//!
//! Every successful response passing through [`HttpFetcher`](crate::HttpFetcher)
//! records the server's `Date` header here. [`ServerTimeCache::current_time`]
//! extrapolates the host's current clock from the last observation, which
//! supports time-bounded operations elsewhere in the SDK without an extra
//! round trip.

use chrono::DateTime;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Entries older than this are treated as absent.
pub const SERVER_TIME_FRESHNESS: u64 = 60 * 5;

/// One observation of a remote host's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimeEntry {
    /// Server time in seconds since the UNIX epoch.
    pub server_time: u64,

    /// Local time, in seconds since the UNIX epoch, at which the server time
    /// was observed.
    pub local_time_recorded: u64,
}

/// Map from hostname to the last observed server time.
///
/// Entries are overwritten on every parseable `Date` header (last write
/// wins) and never explicitly deleted; reads treat entries past the
/// freshness window as absent. Callers wanting process-wide singleton
/// behavior use [`ServerTimeCache::shared`]; callers wanting isolation (e.g.
/// tests) construct their own instance.
#[derive(Debug, Default)]
pub struct ServerTimeCache {
    entries: RwLock<HashMap<String, ServerTimeEntry>>,
}

impl ServerTimeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide shared cache.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: Lazy<Arc<ServerTimeCache>> = Lazy::new(|| Arc::new(ServerTimeCache::new()));
        Arc::clone(&SHARED)
    }

    /// Record a `Date` header value observed for `hostname` at local time
    /// `observed_at` (seconds since the UNIX epoch).
    ///
    /// An unparseable header value leaves any prior entry untouched.
    pub fn record(&self, hostname: &str, date_header: &str, observed_at: u64) {
        let Ok(parsed) = DateTime::parse_from_rfc2822(date_header) else {
            debug!(hostname, date_header, "ignoring unparseable Date header");
            return;
        };
        let timestamp = parsed.timestamp();
        if timestamp < 0 {
            return;
        }
        self.entries.write().insert(
            hostname.to_string(),
            ServerTimeEntry {
                server_time: timestamp as u64,
                local_time_recorded: observed_at,
            },
        );
    }

    /// Extrapolated current server time for `hostname`, in seconds since the
    /// UNIX epoch, or `None` if no fresh observation exists.
    #[must_use]
    pub fn current_time(&self, hostname: &str) -> Option<u64> {
        self.current_time_at(hostname, unix_now_secs())
    }

    /// [`Self::current_time`] against an explicit local clock reading.
    #[must_use]
    pub fn current_time_at(&self, hostname: &str, now: u64) -> Option<u64> {
        let entry = *self.entries.read().get(hostname)?;
        let elapsed = now.checked_sub(entry.local_time_recorded)?;
        if elapsed > SERVER_TIME_FRESHNESS {
            return None;
        }
        Some(entry.server_time + elapsed)
    }
}

pub(crate) fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "equator.example.org";
    const DATE: &str = "Wed, 13 Mar 2019 22:15:07 GMT";
    const DATE_SECS: u64 = 1_552_515_307;

    #[test]
    fn absent_before_any_recording() {
        let cache = ServerTimeCache::new();
        assert_eq!(cache.current_time_at(HOST, 1_552_515_320), None);
    }

    #[test]
    fn extrapolates_from_last_observation() {
        let cache = ServerTimeCache::new();
        cache.record(HOST, DATE, 1_552_515_320);
        assert_eq!(
            cache.current_time_at(HOST, 1_552_515_330),
            Some(DATE_SECS + 10)
        );
    }

    #[test]
    fn stale_after_freshness_window() {
        let cache = ServerTimeCache::new();
        cache.record(HOST, DATE, 1_552_515_320);
        assert!(
            cache
                .current_time_at(HOST, 1_552_515_320 + SERVER_TIME_FRESHNESS)
                .is_some()
        );
        assert_eq!(
            cache.current_time_at(HOST, 1_552_515_320 + SERVER_TIME_FRESHNESS + 1),
            None
        );
    }

    #[test]
    fn unparseable_date_leaves_entry_untouched() {
        let cache = ServerTimeCache::new();
        cache.record(HOST, DATE, 1_552_515_320);
        cache.record(HOST, "not a date", 1_552_515_400);
        assert_eq!(
            cache.current_time_at(HOST, 1_552_515_330),
            Some(DATE_SECS + 10)
        );
    }

    #[test]
    fn last_write_wins_per_hostname() {
        let cache = ServerTimeCache::new();
        cache.record(HOST, DATE, 1_552_515_320);
        cache.record(HOST, "Wed, 13 Mar 2019 23:15:07 GMT", 1_552_518_920);
        assert_eq!(
            cache.current_time_at(HOST, 1_552_518_930),
            Some(DATE_SECS + 3600 + 10)
        );
    }

    #[test]
    fn local_clock_regression_reads_as_absent() {
        let cache = ServerTimeCache::new();
        cache.record(HOST, DATE, 1_552_515_320);
        assert_eq!(cache.current_time_at(HOST, 1_552_515_319), None);
    }
}
