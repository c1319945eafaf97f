//! wsic-embed
//!
//! Embedding provider adapters. The real provider is an external HTTP
//! service; a deterministic hashing provider stands in when
//! `APP_USE_FAKE_EMBEDDINGS` is set or no endpoint is configured.

use std::sync::Arc;

use wsic_core::traits::EmbeddingProvider;

pub mod hashing;
pub mod remote;

pub use hashing::HashingProvider;
pub use remote::RemoteProvider;

/// Dimensionality used when the environment does not specify one.
pub const DEFAULT_DIM: usize = 768;

/// Environment-driven provider selection, mirroring how the indexes pick a
/// backend: fake embeddings when explicitly requested, otherwise the remote
/// endpoint from `APP_EMBED_*`.
pub fn default_provider() -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::debug!("using deterministic hashing embeddings");
        return Ok(Arc::new(HashingProvider::new(DEFAULT_DIM)));
    }
    Ok(Arc::new(RemoteProvider::from_env()?))
}
