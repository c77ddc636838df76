//! URL handling module for Rivulet
//!
//! This module provides URL normalization, host extraction, and the
//! eligibility filter that gates what may enter the frontier.

mod filter;
mod normalize;

pub use filter::UrlFilter;
pub use normalize::normalize_url;

use url::Url;

/// Extracts the politeness key for a URL: the host, plus the port when one
/// is explicitly present. Two ports on one machine are distinct servers and
/// are rate-limited independently.
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host_plain() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_host_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1:8080".to_string()));
    }

    #[test]
    fn test_extract_host_default_port_elided() {
        let url = Url::parse("https://example.com:443/page").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }
}
