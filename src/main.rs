//! Rivulet main entry point
//!
//! Command-line interface for the Rivulet subtree crawler.

use clap::Parser;
use rivulet::config::load_config_with_hash;
use rivulet::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rivulet: a politeness-aware subtree crawler
///
/// Rivulet walks a bounded subtree of one site, extracts structured content,
/// and delivers normalized documents to a search index, respecting
/// robots.txt and per-host rate limits.
#[derive(Parser, Debug)]
#[command(name = "rivulet")]
#[command(version = "0.1.0")]
#[command(about = "A politeness-aware subtree crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,

    /// Override the configured maximum crawl depth for this job
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Override the configured maximum number of pages for this job
    #[arg(long, value_name = "PAGES")]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((config, hash)) => (config, hash),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Job-level overrides
    if let Some(depth) = cli.max_depth {
        config.crawl.max_depth = Some(depth);
    }
    if let Some(pages) = cli.max_pages {
        config.crawl.max_pages = Some(pages);
    }

    if cli.dry_run {
        print_crawl_plan(&config);
        return Ok(());
    }

    match run_crawl(config).await {
        Ok(summary) => {
            println!("Crawl finished:");
            println!("  Pages fetched:       {}", summary.pages_fetched);
            println!("  Robots skips:        {}", summary.robots_skipped);
            println!("  Fetch failures:      {}", summary.fetch_failures);
            println!("  Documents submitted: {}", summary.documents_submitted);
            println!("  Index failures:      {}", summary.index_failures);
            println!("  Links discovered:    {}", summary.links_discovered);
            println!("  Links enqueued:      {}", summary.links_enqueued);
            println!("  Elapsed:             {:.2?}", summary.elapsed);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rivulet=info,warn"),
            1 => EnvFilter::new("rivulet=debug,info"),
            2 => EnvFilter::new("rivulet=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn print_crawl_plan(config: &rivulet::config::Config) {
    println!("=== Rivulet Dry Run ===\n");

    println!("Crawl:");
    println!("  Root prefix: {}", config.crawl.root_prefix);
    println!("  Max depth: {}", bound(config.crawl.max_depth.map(u64::from)));
    println!(
        "  Max pages: {}",
        bound(config.crawl.max_pages.map(|pages| pages as u64))
    );
    println!(
        "  Politeness delay: {}ms",
        config.crawl.politeness_delay_ms
    );
    println!("  Workers: {}", config.crawl.workers);
    println!("  Resumable: {}", config.crawl.resumable);
    if let Some(dir) = &config.crawl.storage_dir {
        println!("  Storage dir: {}", dir);
    }
    println!(
        "  Blocked extensions: {}",
        config.crawl.blocked_extensions.join(", ")
    );

    println!("\nIndex:");
    println!("  Server: {}", config.index.server_url);
    println!("  Commit delay: {}ms", config.index.commit_delay_ms);
    println!("  On error: {:?}", config.index.on_error);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");
    println!("✓ Would seed the frontier with {}", config.crawl.root_prefix);
}

fn bound(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unlimited".to_string())
}
