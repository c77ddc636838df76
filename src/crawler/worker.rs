//! Crawl worker loop
//!
//! Each worker independently pulls URL records from the shared frontier,
//! honors the politeness gate and robots rules, fetches, classifies, feeds
//! discovered links back, and submits the resulting document. Per-URL
//! failures are contained here; only an aborting index error stops the job.

use crate::config::IndexErrorPolicy;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::DiscoveredLink;
use crate::crawler::politeness::HostClock;
use crate::crawler::stats::CrawlStats;
use crate::document::{build_document, classify_content, PageContent};
use crate::frontier::{Frontier, UrlRecord};
use crate::index::{IndexError, IndexSink};
use crate::robots::RobotsPolicy;
use crate::url::{normalize_url, UrlFilter};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// How long an idle worker waits before polling the frontier again
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Shared state handed to every worker
pub(crate) struct CrawlContext {
    pub frontier: Frontier,
    pub host_clock: HostClock,
    pub filter: UrlFilter,
    pub fetcher: Arc<dyn PageFetcher>,
    pub robots: Arc<dyn RobotsPolicy>,
    pub sink: Arc<dyn IndexSink>,
    pub stats: CrawlStats,
    pub index_policy: IndexErrorPolicy,

    /// First aborting index error; picked up by the controller after the
    /// pool drains
    pub abort_error: Mutex<Option<IndexError>>,
}

/// Runs one worker until the frontier is exhausted or the job is stopped
pub(crate) async fn run_worker(ctx: Arc<CrawlContext>, worker_id: usize) {
    tracing::debug!("Worker {} started", worker_id);

    loop {
        if ctx.frontier.is_stopped() {
            break;
        }

        let record = match ctx.frontier.try_dequeue() {
            Some(record) => record,
            None => {
                if ctx.frontier.is_exhausted() {
                    break;
                }
                // Other workers may still enqueue children
                tokio::time::sleep(IDLE_POLL).await;
                continue;
            }
        };

        process_record(&ctx, record).await;
    }

    tracing::debug!("Worker {} exiting", worker_id);
}

/// Handles one claimed record end to end; every path releases the claim
async fn process_record(ctx: &CrawlContext, record: UrlRecord) {
    let url = match Url::parse(&record.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Dropping unparseable frontier URL {}: {}", record.url, e);
            ctx.frontier.complete(false);
            return;
        }
    };

    ctx.host_clock.acquire(&record.host).await;

    if ctx.frontier.is_stopped() {
        // Stop was signaled while waiting on the politeness gate
        ctx.frontier.complete(false);
        return;
    }

    if !ctx.robots.allowed(&url).await {
        tracing::debug!("Disallowed by robots.txt: {}", record.url);
        ctx.stats.record_robots_skipped();
        ctx.frontier.complete(false);
        return;
    }

    let page = match ctx.fetcher.fetch(&url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Fetch failed: {}", e);
            ctx.stats.record_fetch_failure();
            ctx.frontier.complete(false);
            return;
        }
    };

    // A successful fetch consumes page budget no matter what happens during
    // classification or indexing.
    ctx.frontier.complete(true);
    ctx.stats.record_fetched();

    tracing::debug!(
        "Fetched {} (depth {}, {} bytes, {})",
        record.url,
        record.depth,
        page.body.len(),
        page.content_type
    );
    for (name, value) in &page.headers {
        tracing::trace!("  {}: {}", name, value);
    }

    let base_url = Url::parse(&page.final_url).unwrap_or(url);
    let content = classify_content(&page.content_type, &page.body, &base_url);

    if let PageContent::Html { links, .. } = &content {
        feed_links(ctx, &record, links);
    }

    let document = build_document(&record, &page.content_type, &content);
    if let Err(e) = ctx.sink.add(&document).await {
        ctx.stats.record_index_failure();
        match ctx.index_policy {
            IndexErrorPolicy::Skip => {
                tracing::warn!("Index submission failed for {}: {}", record.url, e);
            }
            IndexErrorPolicy::Abort => {
                tracing::error!(
                    "Index submission failed for {}, aborting crawl: {}",
                    record.url,
                    e
                );
                let mut abort_error = ctx.abort_error.lock().unwrap();
                if abort_error.is_none() {
                    *abort_error = Some(e);
                }
                drop(abort_error);
                ctx.frontier.shutdown();
            }
        }
        return;
    }

    ctx.stats.record_submitted();
    tracing::debug!("Indexed {} as document {}", record.url, record.doc_id);
}

/// Runs discovered links through the filter and enqueues the survivors
fn feed_links(ctx: &CrawlContext, record: &UrlRecord, links: &[DiscoveredLink]) {
    for link in links {
        ctx.stats.record_link_discovered();

        let normalized = match normalize_url(link.url.as_str()) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::trace!("Skipping link {}: {}", link.url, e);
                continue;
            }
        };

        if !ctx.filter.should_visit(normalized.as_str(), record.depth) {
            continue;
        }

        let enqueued = ctx.frontier.try_enqueue(
            &normalized,
            record.depth + 1,
            Some(&record.url),
            link.anchor.as_deref(),
        );
        if enqueued {
            ctx.stats.record_link_enqueued();
        }
    }
}
