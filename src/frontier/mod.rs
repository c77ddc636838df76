//! Crawl frontier: pending URLs, deduplication, and page accounting
//!
//! The frontier is the single synchronization domain for the queue of
//! discovered-but-unfetched URLs, the visited set, and the page counters.
//! Workers pull records concurrently; the dedup and max-page invariants rely
//! on every mutation here happening inside one critical section.
//!
//! Dispatch order is FIFO, so the crawl is breadth-first and shallow pages
//! are indexed before deep ones when limits cut the job short.

use crate::url::extract_host;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use url::Url;

/// A URL queued for fetching
///
/// Records are immutable once created and are discarded after the worker
/// that claimed them finishes.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    /// Normalized absolute URL
    pub url: String,

    /// Host the politeness gate keys on
    pub host: String,

    /// Link distance from the seed (0 for the seed itself)
    pub depth: u32,

    /// URL of the page this link was discovered on
    pub parent: Option<String>,

    /// Monotonic discovery-order id; doubles as the index document id
    pub doc_id: u64,

    /// Anchor text of the link that discovered this URL
    pub anchor: Option<String>,
}

#[derive(Debug, Default)]
struct FrontierInner {
    pending: VecDeque<UrlRecord>,
    visited: HashSet<String>,
    in_flight: usize,
    fetched: usize,
    next_doc_id: u64,
}

/// Shared crawl frontier
pub struct Frontier {
    inner: Mutex<FrontierInner>,
    max_pages: Option<usize>,
    stopped: AtomicBool,
}

impl Frontier {
    /// Creates an empty frontier bounded by `max_pages` successful fetches
    /// (`None` for unlimited)
    pub fn new(max_pages: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(FrontierInner::default()),
            max_pages,
            stopped: AtomicBool::new(false),
        }
    }

    /// Attempts to add a URL to the frontier.
    ///
    /// Returns false without side effects when the URL was already enqueued
    /// this job, the page budget is spent, or the URL has no host. The
    /// visited check and the append happen in one critical section, so
    /// concurrent producers cannot double-enqueue a URL.
    pub fn try_enqueue(
        &self,
        url: &Url,
        depth: u32,
        parent: Option<&str>,
        anchor: Option<&str>,
    ) -> bool {
        let Some(host) = extract_host(url) else {
            return false;
        };
        let key = url.to_string();

        let mut inner = self.inner.lock().unwrap();

        if let Some(max_pages) = self.max_pages {
            if inner.fetched >= max_pages {
                return false;
            }
        }

        if !inner.visited.insert(key.clone()) {
            return false;
        }

        let doc_id = inner.next_doc_id;
        inner.next_doc_id += 1;

        inner.pending.push_back(UrlRecord {
            url: key,
            host,
            depth,
            parent: parent.map(str::to_string),
            doc_id,
            anchor: anchor.map(str::to_string),
        });

        true
    }

    /// Claims the head of the queue.
    ///
    /// Returns `None` when the crawl is stopped, the queue is empty, or the
    /// page budget is already covered by fetches plus outstanding claims.
    /// The pop and the claim-count increment happen in one critical section,
    /// so racing workers cannot over-dispatch past `max_pages`.
    pub fn try_dequeue(&self) -> Option<UrlRecord> {
        if self.is_stopped() {
            return None;
        }

        let mut inner = self.inner.lock().unwrap();

        if let Some(max_pages) = self.max_pages {
            if inner.fetched + inner.in_flight >= max_pages {
                return None;
            }
        }

        let record = inner.pending.pop_front()?;
        inner.in_flight += 1;
        Some(record)
    }

    /// Releases the claim taken by [`try_dequeue`](Self::try_dequeue).
    ///
    /// `fetched = true` moves the claim into the fetched count: exactly
    /// once per successfully fetched page, whatever happens downstream.
    /// Robots skips and fetch failures release the claim without counting,
    /// returning that slot of the page budget.
    pub fn complete(&self, fetched: bool) {
        let mut inner = self.inner.lock().unwrap();
        debug_assert!(inner.in_flight > 0, "complete() without a claim");
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if fetched {
            inner.fetched += 1;
        }
    }

    /// True when no more work can ever be dispatched: nothing is in flight
    /// and the queue is empty or the page budget is spent.
    ///
    /// A non-empty queue with a spent budget counts as exhausted so workers
    /// drain instead of spinning when `max_pages` is hit first.
    pub fn is_exhausted(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        if inner.in_flight > 0 {
            return false;
        }
        let budget_spent = self
            .max_pages
            .map(|max_pages| inner.fetched >= max_pages)
            .unwrap_or(false);
        inner.pending.is_empty() || budget_spent
    }

    /// Signals all workers to stop: no dequeue succeeds after this.
    /// In-flight work may still call [`complete`](Self::complete).
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// True once [`shutdown`](Self::shutdown) has been called
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Number of successfully fetched pages so far
    pub fn fetched_count(&self) -> usize {
        self.inner.lock().unwrap().fetched
    }

    /// Number of records waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Number of distinct URLs ever enqueued
    pub fn visited_count(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_enqueue_and_dequeue_fifo() {
        let frontier = Frontier::new(None);

        assert!(frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None));
        assert!(frontier.try_enqueue(&parse("https://example.com/b"), 1, None, None));
        assert!(frontier.try_enqueue(&parse("https://example.com/c"), 1, None, None));

        let urls: Vec<String> = std::iter::from_fn(|| {
            frontier.try_dequeue().map(|record| {
                frontier.complete(true);
                record.url
            })
        })
        .collect();

        assert_eq!(
            urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ]
        );
    }

    #[test]
    fn test_duplicate_enqueue_rejected() {
        let frontier = Frontier::new(None);

        assert!(frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None));
        assert!(!frontier.try_enqueue(&parse("https://example.com/a"), 2, None, None));
        assert_eq!(frontier.pending_len(), 1);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_doc_ids_follow_discovery_order() {
        let frontier = Frontier::new(None);

        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);
        frontier.try_enqueue(&parse("https://example.com/b"), 0, None, None);

        assert_eq!(frontier.try_dequeue().unwrap().doc_id, 0);
        assert_eq!(frontier.try_dequeue().unwrap().doc_id, 1);
    }

    #[test]
    fn test_record_fields() {
        let frontier = Frontier::new(None);
        frontier.try_enqueue(
            &parse("https://example.com/child"),
            2,
            Some("https://example.com/parent"),
            Some("click here"),
        );

        let record = frontier.try_dequeue().unwrap();
        assert_eq!(record.url, "https://example.com/child");
        assert_eq!(record.host, "example.com");
        assert_eq!(record.depth, 2);
        assert_eq!(record.parent.as_deref(), Some("https://example.com/parent"));
        assert_eq!(record.anchor.as_deref(), Some("click here"));
    }

    #[test]
    fn test_claims_prevent_over_dispatch() {
        let frontier = Frontier::new(Some(1));

        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);
        frontier.try_enqueue(&parse("https://example.com/b"), 0, None, None);

        // One claim outstanding covers the whole budget
        assert!(frontier.try_dequeue().is_some());
        assert!(frontier.try_dequeue().is_none());
    }

    #[test]
    fn test_failed_claim_returns_budget() {
        let frontier = Frontier::new(Some(1));

        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);
        frontier.try_enqueue(&parse("https://example.com/b"), 0, None, None);

        frontier.try_dequeue().unwrap();
        frontier.complete(false);

        // The failed fetch did not consume the budget
        assert_eq!(frontier.fetched_count(), 0);
        let record = frontier.try_dequeue().unwrap();
        assert_eq!(record.url, "https://example.com/b");
    }

    #[test]
    fn test_budget_spent_blocks_dispatch_and_enqueue() {
        let frontier = Frontier::new(Some(1));

        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);
        frontier.try_enqueue(&parse("https://example.com/b"), 0, None, None);

        frontier.try_dequeue().unwrap();
        frontier.complete(true);

        // Budget is spent: the queued record is never dispatched and new
        // discoveries are dropped.
        assert!(frontier.try_dequeue().is_none());
        assert!(!frontier.try_enqueue(&parse("https://example.com/c"), 1, None, None));
        assert!(frontier.is_exhausted());
    }

    #[test]
    fn test_exhaustion() {
        let frontier = Frontier::new(None);
        assert!(frontier.is_exhausted());

        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);
        assert!(!frontier.is_exhausted());

        frontier.try_dequeue().unwrap();
        // Claimed but not completed: workers may still enqueue children
        assert!(!frontier.is_exhausted());

        frontier.complete(true);
        assert!(frontier.is_exhausted());
    }

    #[test]
    fn test_shutdown_blocks_dequeue() {
        let frontier = Frontier::new(None);
        frontier.try_enqueue(&parse("https://example.com/a"), 0, None, None);

        frontier.shutdown();
        assert!(frontier.is_stopped());
        assert!(frontier.try_dequeue().is_none());
    }

    #[test]
    fn test_concurrent_enqueue_dedups() {
        use std::sync::Arc;

        let frontier = Arc::new(Frontier::new(None));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let frontier = Arc::clone(&frontier);
            handles.push(std::thread::spawn(move || {
                let mut accepted = 0;
                for i in 0..100 {
                    let url = parse(&format!("https://example.com/page{}", i));
                    if frontier.try_enqueue(&url, 0, None, None) {
                        accepted += 1;
                    }
                }
                accepted
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 100);
        assert_eq!(frontier.pending_len(), 100);
    }
}
