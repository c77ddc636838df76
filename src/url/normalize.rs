use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a raw URL string into the canonical form used for frontier
/// deduplication.
///
/// Normalization parses the URL (which lower-cases the host), requires an
/// http(s) scheme and a host, and strips the fragment: `/page#top` and
/// `/page` are the same fetch.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - The normalized URL
/// * `Err(UrlError)` - The URL is unparseable, schemeless, or hostless
pub fn normalize_url(raw: &str) -> UrlResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
