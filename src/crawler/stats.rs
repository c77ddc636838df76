//! Crawl statistics
//!
//! Live counters shared by all workers, snapshotted into the user-visible
//! summary when the job ends.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Live counters for a running crawl
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicU64,
    robots_skipped: AtomicU64,
    fetch_failures: AtomicU64,
    documents_submitted: AtomicU64,
    index_failures: AtomicU64,
    links_discovered: AtomicU64,
    links_enqueued: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_robots_skipped(&self) {
        self.robots_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submitted(&self) {
        self.documents_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_index_failure(&self) {
        self.index_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_discovered(&self) {
        self.links_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_enqueued(&self) {
        self.links_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Freezes the counters into a summary
    pub fn snapshot(&self, elapsed: Duration) -> CrawlSummary {
        CrawlSummary {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            robots_skipped: self.robots_skipped.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            documents_submitted: self.documents_submitted.load(Ordering::Relaxed),
            index_failures: self.index_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            links_enqueued: self.links_enqueued.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

/// Summary of a finished crawl job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages successfully fetched (what max-pages bounds)
    pub pages_fetched: u64,

    /// URLs skipped because robots.txt disallowed them
    pub robots_skipped: u64,

    /// URLs whose fetch failed (network, timeout, non-success status)
    pub fetch_failures: u64,

    /// Documents accepted by the index sink
    pub documents_submitted: u64,

    /// Documents the index sink rejected
    pub index_failures: u64,

    /// Links seen on fetched pages, before filtering
    pub links_discovered: u64,

    /// Links that passed the filter and entered the frontier
    pub links_enqueued: u64,

    /// Wall-clock duration of the job
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Dispatched URLs that produced no document
    pub fn pages_skipped(&self) -> u64 {
        self.robots_skipped + self.fetch_failures
    }

    /// Fraction of fetched pages that made it into the index, as a percentage
    pub fn submission_rate(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        (self.documents_submitted as f64 / self.pages_fetched as f64) * 100.0
    }
}
