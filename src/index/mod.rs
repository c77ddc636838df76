//! Index sink interface
//!
//! The crawler hands finished documents to the search index through the
//! [`IndexSink`] trait. The default implementation is the Solr-style HTTP
//! adapter in [`SolrSink`]; tests substitute in-memory fakes.

mod solr;

pub use solr::SolrSink;

use crate::document::IndexDocument;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by index operations
///
/// Transport-level and server-level failures both collapse into this one
/// type; the caller decides (by policy) whether they abort the job.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failure reaching the index server at all
    #[error("index transport error: {0}")]
    Transport(String),

    /// The index server answered with a non-success status
    #[error("index server returned HTTP {0}")]
    Server(u16),
}

/// Thread-safe facade over the external search index
///
/// Implementations must tolerate concurrent calls from multiple workers,
/// either by serializing internally or by delegating to a thread-safe
/// transport.
#[async_trait]
pub trait IndexSink: Send + Sync {
    /// Adds a single document
    async fn add(&self, document: &IndexDocument) -> Result<(), IndexError>;

    /// Adds a batch of documents in one request
    async fn add_batch(&self, documents: &[IndexDocument]) -> Result<(), IndexError>;

    /// Makes all pending documents visible
    async fn commit(&self) -> Result<(), IndexError>;
}
