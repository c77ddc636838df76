//! Solr-style HTTP index sink
//!
//! A narrow adapter over a Solr-like JSON update endpoint. Documents are
//! posted as JSON arrays; the commit delay rides along as `commitWithin` and
//! bounds how long the server may buffer before making documents visible.
//! The adapter itself does no buffering, and the reqwest client is
//! internally thread-safe, so concurrent workers can share one sink.

use crate::document::IndexDocument;
use crate::index::{IndexError, IndexSink};
use async_trait::async_trait;
use reqwest::Client;

/// HTTP adapter for a Solr-style index core
pub struct SolrSink {
    client: Client,
    server_url: String,
    commit_within_ms: u64,
}

impl SolrSink {
    /// Creates a sink for the given core URL
    /// (e.g. `http://localhost:8983/solr/pages`)
    pub fn new(server_url: &str, commit_within_ms: u64) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            commit_within_ms,
        }
    }

    /// Creates a sink around an existing client
    pub fn with_client(client: Client, server_url: &str, commit_within_ms: u64) -> Self {
        Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            commit_within_ms,
        }
    }

    fn update_url(&self) -> String {
        format!("{}/update", self.server_url)
    }
}

#[async_trait]
impl IndexSink for SolrSink {
    async fn add(&self, document: &IndexDocument) -> Result<(), IndexError> {
        self.add_batch(std::slice::from_ref(document)).await
    }

    async fn add_batch(&self, documents: &[IndexDocument]) -> Result<(), IndexError> {
        let response = self
            .client
            .post(self.update_url())
            .query(&[("commitWithin", self.commit_within_ms.to_string())])
            .json(documents)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        check_status(response.status())
    }

    async fn commit(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .post(self.update_url())
            .query(&[("commit", "true")])
            .json(&serde_json::json!([]))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        check_status(response.status())
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<(), IndexError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(IndexError::Server(status.as_u16()))
    }
}
