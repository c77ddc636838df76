use crate::config::types::{Config, CrawlConfig, IndexConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_index_config(&config.index)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let root = Url::parse(&config.root_prefix)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-prefix: {}", e)))?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "root-prefix must be an http(s) URL, got scheme '{}'",
            root.scheme()
        )));
    }

    if root.host_str().is_none() {
        return Err(ConfigError::Validation(
            "root-prefix must have a host".to_string(),
        ));
    }

    if config.workers < 1 || config.workers > 64 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 64, got {}",
            config.workers
        )));
    }

    if config.politeness_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "politeness-delay-ms must be at most 60000, got {}",
            config.politeness_delay_ms
        )));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    if let Some(dir) = &config.storage_dir {
        if dir.is_empty() {
            return Err(ConfigError::Validation(
                "storage-dir cannot be empty when set".to_string(),
            ));
        }
    }

    for extension in &config.blocked_extensions {
        if extension.is_empty()
            || !extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::Validation(format!(
                "Invalid blocked extension '{}': extensions are bare \
                 alphanumeric suffixes like 'pdf'",
                extension
            )));
        }
    }

    Ok(())
}

/// Validates index sink configuration
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    let server = Url::parse(&config.server_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index server-url: {}", e)))?;

    if server.scheme() != "http" && server.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "index server-url must be an http(s) URL, got scheme '{}'",
            server.scheme()
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{default_blocked_extensions, IndexErrorPolicy};

    fn create_test_config() -> Config {
        Config {
            crawl: CrawlConfig {
                root_prefix: "https://example.com/docs/".to_string(),
                storage_dir: None,
                max_depth: Some(3),
                max_pages: Some(100),
                politeness_delay_ms: 1000,
                workers: 3,
                resumable: false,
                blocked_extensions: default_blocked_extensions(),
            },
            index: IndexConfig {
                server_url: "http://localhost:8983/solr/pages".to_string(),
                commit_delay_ms: 60_000,
                on_error: IndexErrorPolicy::Abort,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = create_test_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_root_prefix() {
        let mut config = create_test_config();
        config.crawl.root_prefix = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_root_prefix() {
        let mut config = create_test_config();
        config.crawl.root_prefix = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_workers() {
        let mut config = create_test_config();
        config.crawl.workers = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_politeness_delay() {
        let mut config = create_test_config();
        config.crawl.politeness_delay_ms = 120_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_pages() {
        let mut config = create_test_config();
        config.crawl.max_pages = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unlimited_bounds_are_valid() {
        let mut config = create_test_config();
        config.crawl.max_depth = None;
        config.crawl.max_pages = None;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_blocked_extension() {
        let mut config = create_test_config();
        config.crawl.blocked_extensions = vec![".pdf".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_index_server_url() {
        let mut config = create_test_config();
        config.index.server_url = "localhost:8983".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
