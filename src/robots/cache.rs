//! Robots.txt caching
//!
//! Stores the raw robots.txt body per host along with the fetch timestamp,
//! so rules are re-fetched daily rather than on every request.

use chrono::{DateTime, Duration, Utc};

/// Cached robots.txt body for one host
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// Raw robots.txt body; empty when the host has none
    pub body: String,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Caches `body` with the current timestamp
    pub fn new(body: String) -> Self {
        Self {
            body,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached robots.txt is stale (older than 24 hours).
    ///
    /// Robots.txt is refreshed daily so rule changes made by the site owner
    /// take effect within a day.
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.fetched_at > Duration::hours(24)
    }

    /// Returns how long ago the robots.txt was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}
