//! Crawl controller - job lifecycle and worker pool orchestration
//!
//! The controller owns the crawl job from seed to final commit:
//! - validate and seed the frontier
//! - spin up the worker pool
//! - block until the frontier is exhausted or the job is stopped
//! - issue the final index commit and report the summary

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageFetcher};
use crate::crawler::politeness::HostClock;
use crate::crawler::stats::{CrawlStats, CrawlSummary};
use crate::crawler::worker::{run_worker, CrawlContext};
use crate::frontier::Frontier;
use crate::index::{IndexSink, SolrSink};
use crate::robots::{HttpRobots, RobotsPolicy};
use crate::url::{normalize_url, UrlFilter};
use crate::{ConfigError, RivuletError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Lifecycle phase of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Constructed, frontier empty
    Init,

    /// Seed enqueued, workers not yet started
    Seeded,

    /// Worker pool active
    Running,

    /// Workers have exited their loops; frontier frozen
    Draining,

    /// Final commit issued, summary available
    Done,
}

/// Orchestrates a crawl job
pub struct Controller {
    config: Arc<Config>,
    ctx: Arc<CrawlContext>,
    phase: CrawlPhase,
}

impl Controller {
    /// Creates a controller with explicit capability implementations.
    ///
    /// Capabilities are injected so tests can substitute fakes; production
    /// wiring lives in [`run_crawl`].
    pub fn new(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        robots: Arc<dyn RobotsPolicy>,
        sink: Arc<dyn IndexSink>,
    ) -> Result<Self, RivuletError> {
        if let Some(dir) = &config.crawl.storage_dir {
            std::fs::create_dir_all(dir)?;
        }

        if config.crawl.resumable {
            tracing::warn!(
                "Resumable crawling requires an external frontier store; starting from the seed"
            );
        }

        let filter = UrlFilter::new(
            &config.crawl.root_prefix,
            config.crawl.max_depth,
            &config.crawl.blocked_extensions,
        );

        let ctx = Arc::new(CrawlContext {
            frontier: Frontier::new(config.crawl.max_pages),
            host_clock: HostClock::new(Duration::from_millis(config.crawl.politeness_delay_ms)),
            filter,
            fetcher,
            robots,
            sink,
            stats: CrawlStats::new(),
            index_policy: config.index.on_error,
            abort_error: Mutex::new(None),
        });

        Ok(Self {
            config: Arc::new(config),
            ctx,
            phase: CrawlPhase::Init,
        })
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the job to completion and returns the summary.
    ///
    /// Blocks until every worker has exited and the final commit went
    /// through. An aborting index error skips the commit and surfaces as the
    /// job's result.
    pub async fn run(&mut self) -> Result<CrawlSummary, RivuletError> {
        let started = Instant::now();

        self.seed()?;

        let workers = self.config.crawl.workers;
        tracing::info!(
            "Starting crawl of {} with {} workers (max depth: {}, max pages: {})",
            self.config.crawl.root_prefix,
            workers,
            describe_bound(self.config.crawl.max_depth.map(u64::from)),
            describe_bound(self.config.crawl.max_pages.map(|pages| pages as u64)),
        );

        self.phase = CrawlPhase::Running;
        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let ctx = Arc::clone(&self.ctx);
            handles.push(tokio::spawn(run_worker(ctx, worker_id)));
        }

        // Workers drain themselves: each exits once it observes the frontier
        // exhausted (or the stop signal). Joining them all means the frontier
        // is quiescent.
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task panicked: {}", e);
            }
        }
        self.phase = CrawlPhase::Draining;

        // No frontier mutation is accepted past this point
        self.ctx.frontier.shutdown();

        if let Some(e) = self.ctx.abort_error.lock().unwrap().take() {
            tracing::error!(
                "Crawl aborted by index error after {} fetched pages",
                self.ctx.frontier.fetched_count()
            );
            return Err(RivuletError::Index(e));
        }

        tracing::info!("Frontier exhausted, committing index");
        self.ctx.sink.commit().await?;
        self.phase = CrawlPhase::Done;

        let summary = self.ctx.stats.snapshot(started.elapsed());
        tracing::info!(
            "Crawl complete: {} pages fetched, {} skipped, {} documents submitted in {:.2?}",
            summary.pages_fetched,
            summary.pages_skipped(),
            summary.documents_submitted,
            summary.elapsed
        );
        Ok(summary)
    }

    /// Validates and enqueues the seed URL at depth 0
    fn seed(&mut self) -> Result<(), RivuletError> {
        let root = normalize_url(&self.config.crawl.root_prefix).map_err(|e| {
            RivuletError::Config(ConfigError::InvalidUrl(format!("root-prefix: {}", e)))
        })?;

        if !self.ctx.frontier.try_enqueue(&root, 0, None, None) {
            return Err(RivuletError::Config(ConfigError::Validation(format!(
                "seed URL {} could not be enqueued",
                root
            ))));
        }

        self.phase = CrawlPhase::Seeded;
        tracing::info!("Seeded frontier with {}", root);
        Ok(())
    }
}

fn describe_bound(bound: Option<u64>) -> String {
    bound
        .map(|value| value.to_string())
        .unwrap_or_else(|| "unlimited".to_string())
}

/// Runs a crawl with the default capability wiring: reqwest fetcher, HTTP
/// robots policy, and the Solr-style index sink. The sink is constructed
/// once here, shared by every worker, and committed once at job end.
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, RivuletError> {
    let client = build_http_client(&config.user_agent)?;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::from_client(client.clone()));
    let robots: Arc<dyn RobotsPolicy> = Arc::new(HttpRobots::new(
        client,
        config.user_agent.crawler_name.clone(),
    ));
    let sink: Arc<dyn IndexSink> = Arc::new(SolrSink::new(
        &config.index.server_url,
        config.index.commit_delay_ms,
    ));

    let mut controller = Controller::new(config, fetcher, robots, sink)?;
    controller.run().await
}
