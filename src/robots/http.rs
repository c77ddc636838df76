//! Default robots.txt policy backed by HTTP fetches

use crate::robots::cache::CachedRobots;
use crate::robots::RobotsPolicy;
use crate::url::extract_host;
use async_trait::async_trait;
use reqwest::Client;
use robotstxt::DefaultMatcher;
use std::collections::HashMap;
use tokio::sync::Mutex;
use url::Url;

/// Fetches and caches robots.txt per host, evaluating rules against the
/// crawler's agent token.
///
/// A host whose robots.txt is missing or unreachable is treated as fully
/// allowed; an empty body disallows nothing.
pub struct HttpRobots {
    client: Client,
    agent: String,
    cache: Mutex<HashMap<String, CachedRobots>>,
}

impl HttpRobots {
    /// Creates a policy for the given agent token. Robots.txt rules match on
    /// the product token, so this is the crawler name rather than the full
    /// user-agent string.
    pub fn new(client: Client, agent: String) -> Self {
        Self {
            client,
            agent,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches the robots.txt body for the origin serving `url`
    async fn fetch_robots_body(&self, url: &Url) -> String {
        let Some(host) = extract_host(url) else {
            return String::new();
        };
        let robots_url = format!("{}://{}/robots.txt", url.scheme(), host);

        match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().is_success() => {
                response.text().await.unwrap_or_default()
            }
            Ok(response) => {
                tracing::debug!(
                    "No robots.txt at {} (HTTP {}), allowing all",
                    robots_url,
                    response.status()
                );
                String::new()
            }
            Err(e) => {
                tracing::debug!("robots.txt fetch failed for {}: {}, allowing all", robots_url, e);
                String::new()
            }
        }
    }
}

#[async_trait]
impl RobotsPolicy for HttpRobots {
    async fn allowed(&self, url: &Url) -> bool {
        let Some(host) = extract_host(url) else {
            return false;
        };

        // The lock is held across the fetch so each host's rules are only
        // fetched once, even when several workers hit the host together.
        let mut cache = self.cache.lock().await;
        let needs_fetch = cache
            .get(&host)
            .map(|cached| cached.is_stale())
            .unwrap_or(true);
        if needs_fetch {
            tracing::debug!("Fetching robots.txt for host: {}", host);
            let body = self.fetch_robots_body(url).await;
            cache.insert(host.clone(), CachedRobots::new(body));
        }
        let body = cache
            .get(&host)
            .map(|cached| cached.body.clone())
            .unwrap_or_default();
        drop(cache);

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&body, &self.agent, url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_honors_disallow() {
        let body = "User-agent: *\nDisallow: /private";
        let mut matcher = DefaultMatcher::default();

        assert!(!matcher.one_agent_allowed_by_robots(
            body,
            "TestCrawler",
            "https://example.com/private/page"
        ));
        assert!(matcher.one_agent_allowed_by_robots(
            body,
            "TestCrawler",
            "https://example.com/public/page"
        ));
    }

    #[test]
    fn test_empty_body_allows_all() {
        let mut matcher = DefaultMatcher::default();
        assert!(matcher.one_agent_allowed_by_robots("", "TestCrawler", "https://example.com/any"));
    }

    #[test]
    fn test_agent_specific_rules() {
        let body = "User-agent: TestCrawler\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let mut matcher = DefaultMatcher::default();

        assert!(!matcher.one_agent_allowed_by_robots(
            body,
            "TestCrawler",
            "https://example.com/page"
        ));
        assert!(matcher.one_agent_allowed_by_robots(
            body,
            "OtherBot",
            "https://example.com/page"
        ));
    }
}
