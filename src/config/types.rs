use serde::Deserialize;

/// Main configuration structure for Rivulet
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub index: IndexConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL prefix bounding the crawl; only URLs under it are ever visited
    #[serde(rename = "root-prefix")]
    pub root_prefix: String,

    /// Working directory for crawl artifacts; opaque to the engine
    #[serde(rename = "storage-dir", default)]
    pub storage_dir: Option<String>,

    /// Maximum link depth from the seed; absent means unlimited
    #[serde(rename = "max-depth", default)]
    pub max_depth: Option<u32>,

    /// Maximum number of pages to fetch; absent means unlimited
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Number of concurrent crawl workers
    pub workers: usize,

    /// Reload prior frontier state from an external store; the engine itself
    /// keeps no persistent state, so without one the crawl starts fresh
    #[serde(default)]
    pub resumable: bool,

    /// File extensions never fetched (case-insensitive suffix match)
    #[serde(
        rename = "blocked-extensions",
        default = "default_blocked_extensions"
    )]
    pub blocked_extensions: Vec<String>,
}

/// The classic static-asset extension blacklist
pub fn default_blocked_extensions() -> Vec<String> {
    [
        "css", "js", "bmp", "gif", "jpg", "jpeg", "png", "tif", "tiff", "mid",
        "mp2", "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "pdf",
        "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
    ]
    .iter()
    .map(|extension| extension.to_string())
    .collect()
}

/// Index sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the index server core
    #[serde(rename = "server-url")]
    pub server_url: String,

    /// How long the server may buffer documents before making them visible
    /// (milliseconds); passed through to the server on every add
    #[serde(rename = "commit-delay-ms", default = "default_commit_delay_ms")]
    pub commit_delay_ms: u64,

    /// What to do when a document submission fails
    #[serde(rename = "on-error", default)]
    pub on_error: IndexErrorPolicy,
}

fn default_commit_delay_ms() -> u64 {
    60_000
}

/// Policy for handling a failed document submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexErrorPolicy {
    /// Stop the whole crawl job on the first index failure
    #[default]
    Abort,

    /// Log the failure and keep crawling
    Skip,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}
