//! Rivulet: a politeness-aware subtree crawler
//!
//! This crate implements a web crawler that walks a bounded subtree of one
//! site, extracts structured content, and delivers normalized documents to a
//! search index, respecting robots.txt and per-host rate limits.

pub mod config;
pub mod crawler;
pub mod document;
pub mod frontier;
pub mod index;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Rivulet operations
#[derive(Debug, Error)]
pub enum RivuletError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Controller, CrawlPhase, CrawlSummary};
pub use document::{IndexDocument, PageContent};
pub use frontier::{Frontier, UrlRecord};
pub use index::{IndexError, IndexSink};
pub use crate::url::{extract_host, normalize_url, UrlFilter};
