//! Robots.txt handling module
//!
//! The crawl engine consults robots rules through the [`RobotsPolicy`]
//! trait; [`HttpRobots`] is the default implementation, fetching and caching
//! robots.txt per host. A disallowed URL is a skip signal, not an error.

mod cache;
mod http;

pub use cache::CachedRobots;
pub use http::HttpRobots;

use async_trait::async_trait;
use url::Url;

/// Capability that answers whether a URL may be fetched
#[async_trait]
pub trait RobotsPolicy: Send + Sync {
    /// Returns true when robots rules permit fetching `url`
    async fn allowed(&self, url: &Url) -> bool;
}
