use async_trait::async_trait;

use crate::types::{Difficulty, GenerationJob, SearchResult, VectorFilter};

/// Exact/full-text matching over published topic titles and descriptions.
/// The primary, always-available search path.
#[async_trait]
pub trait LexicalSearch: Send + Sync {
    async fn search(
        &self,
        term: &str,
        difficulty: Option<Difficulty>,
        limit: usize,
    ) -> anyhow::Result<Vec<SearchResult>>;
}

/// External embedding model. Returns `None` on failure rather than an error;
/// the orchestrator treats a missing vector as a degraded (vector-less)
/// search, never as a fault.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn dim(&self) -> usize;
    async fn embed(&self, text: &str) -> Option<Vec<f32>>;
}

/// Approximate nearest-neighbor search over topic embeddings.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn nearest_neighbors(
        &self,
        vector: &[f32],
        limit: usize,
        filters: &[VectorFilter],
    ) -> anyhow::Result<Vec<SearchResult>>;
}

/// Asynchronous job queue used to kick off content generation. Enqueue is
/// fire-and-forget beyond acceptance; returns the accepted message id.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &GenerationJob) -> anyhow::Result<String>;
}
