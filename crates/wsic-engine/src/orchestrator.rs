//! Search orchestration around the reconciliation engine.
//!
//! Issues the lexical path and the embed→vector path concurrently, each
//! under its own timeout, so user-visible latency is bounded by the slower
//! path rather than their sum. The vector path degrades to an empty result
//! set on any failure; a lexical failure propagates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use wsic_core::config::SearchTuning;
use wsic_core::traits::{EmbeddingProvider, LexicalSearch, VectorSearch};
use wsic_core::types::{Difficulty, ReconciliationOutcome, SearchResult, VectorFilter};
use wsic_core::{Error, Result};

use crate::reconcile::{reconcile, EngineParams};

/// A completed search. `Superseded` marks a reply whose query was replaced
/// by a newer one while it was in flight; consumers must discard it instead
/// of overwriting the current display state.
#[derive(Debug)]
pub enum SearchReply {
    Fresh(SearchResponse),
    Superseded,
}

#[derive(Debug)]
pub struct SearchResponse {
    pub outcome: ReconciliationOutcome,
    pub offer_generation: bool,
}

pub struct SearchOrchestrator {
    lexical: Arc<dyn LexicalSearch>,
    embedder: Arc<dyn EmbeddingProvider>,
    vector: Arc<dyn VectorSearch>,
    tuning: SearchTuning,
    latest: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(
        lexical: Arc<dyn LexicalSearch>,
        embedder: Arc<dyn EmbeddingProvider>,
        vector: Arc<dyn VectorSearch>,
        tuning: SearchTuning,
    ) -> Self {
        Self {
            lexical,
            embedder,
            vector,
            tuning,
            latest: AtomicU64::new(0),
        }
    }

    /// Run one orchestrated search.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty query (rejected before any I/O);
    /// `LexicalSearch` when the primary path fails or times out. Vector-path
    /// faults never error.
    pub async fn search(&self, query: &str, difficulty: Difficulty) -> Result<SearchReply> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidArgument("empty query".to_string()));
        }

        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let lexical_fut = timeout(
            Duration::from_millis(self.tuning.lexical_timeout_ms),
            // Difficulty is deliberately not filtered here: the engine needs
            // off-difficulty lexical matches for the related tier.
            self.lexical.search(query, None, self.tuning.lexical_limit),
        );
        let vector_fut = self.vector_path(query);

        let (lexical_reply, vector_results) = tokio::join!(lexical_fut, vector_fut);
        let lexical_results = match lexical_reply {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => return Err(Error::LexicalSearch(e)),
            Err(_) => {
                return Err(Error::LexicalSearch(anyhow::anyhow!(
                    "lexical search timed out after {}ms",
                    self.tuning.lexical_timeout_ms
                )))
            }
        };

        let params = EngineParams {
            similarity_threshold: self.tuning.similarity_threshold,
        };
        let outcome = reconcile(query, difficulty, &lexical_results, &vector_results, &params)?;
        tracing::debug!(
            query,
            found = outcome.found.len(),
            related = outcome.related.len(),
            "search reconciled"
        );

        // A newer query was issued while this one was in flight; its results
        // must not be applied over the newer ones.
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!(query, ticket, "search superseded");
            return Ok(SearchReply::Superseded);
        }

        let offer_generation = outcome.offer_generation();
        Ok(SearchReply::Fresh(SearchResponse {
            outcome,
            offer_generation,
        }))
    }

    /// Embed the query, then search the vector index. Every failure mode —
    /// provider returned `None`, either call timed out, the index errored —
    /// degrades to an empty result set so lexical-only output stays valid.
    async fn vector_path(&self, query: &str) -> Vec<SearchResult> {
        let embedded = timeout(
            Duration::from_millis(self.tuning.embed_timeout_ms),
            self.embedder.embed(query),
        )
        .await;
        let vector = match embedded {
            Ok(Some(v)) => v,
            Ok(None) => {
                tracing::warn!(query, "embedding unavailable; vector path degraded");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(query, "embedding timed out; vector path degraded");
                return Vec::new();
            }
        };

        let searched = timeout(
            Duration::from_millis(self.tuning.vector_timeout_ms),
            self.vector.nearest_neighbors(
                &vector,
                self.tuning.vector_limit,
                &[VectorFilter::PublishedOnly],
            ),
        )
        .await;
        match searched {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                tracing::warn!(query, error = %e, "vector search failed; degraded");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(query, "vector search timed out; degraded");
                Vec::new()
            }
        }
    }
}
