//! URL eligibility filtering
//!
//! Decides whether a discovered URL may enter the frontier. The decision is
//! a pure function of the URL and its parent's depth, so it is safe to call
//! from any number of workers at once.

/// Pure eligibility filter for discovered URLs
///
/// A URL is eligible when it does not end in a blocked extension, it lies
/// under the configured root prefix, and following it would not exceed the
/// maximum depth. All string matching is done on the lower-cased URL.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    root_prefix: String,
    max_depth: Option<u32>,
    blocked_suffixes: Vec<String>,
}

impl UrlFilter {
    /// Creates a filter for the given scope
    ///
    /// # Arguments
    ///
    /// * `root_prefix` - The URL prefix bounding the crawl
    /// * `max_depth` - Maximum link depth, or `None` for unlimited
    /// * `blocked_extensions` - Bare extensions (e.g. `"pdf"`) to reject
    pub fn new(
        root_prefix: &str,
        max_depth: Option<u32>,
        blocked_extensions: &[String],
    ) -> Self {
        Self {
            root_prefix: root_prefix.to_lowercase(),
            max_depth,
            blocked_suffixes: blocked_extensions
                .iter()
                .map(|extension| format!(".{}", extension.to_lowercase()))
                .collect(),
        }
    }

    /// Decides whether a URL discovered on a page at `parent_depth` should
    /// be visited.
    ///
    /// Idempotent: the same URL/depth pair always gets the same answer.
    pub fn should_visit(&self, url: &str, parent_depth: u32) -> bool {
        if let Some(max_depth) = self.max_depth {
            if parent_depth + 1 > max_depth {
                return false;
            }
        }

        let lowered = url.to_lowercase();

        if self
            .blocked_suffixes
            .iter()
            .any(|suffix| lowered.ends_with(suffix))
        {
            return false;
        }

        lowered.starts_with(&self.root_prefix)
    }
}
