//! Configuration loading and validation
//!
//! Configuration is a TOML file with kebab-case keys, split into a `[crawl]`
//! section (scope, bounds, politeness), an `[index]` section (sink endpoint
//! and failure policy), and a `[user-agent]` section (crawler identity).

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    default_blocked_extensions, Config, CrawlConfig, IndexConfig, IndexErrorPolicy,
    UserAgentConfig,
};
pub use validation::validate;
