use async_trait::async_trait;

use wsic_core::traits::EmbeddingProvider;

/// Deterministic bag-of-words embedder for offline runs and tests.
///
/// Each token is hashed into one slot of the vector; the result is
/// L2-normalized. Not semantically meaningful, but stable: identical texts
/// always produce identical vectors, which is what index and engine tests
/// rely on.
pub struct HashingProvider {
    dim: usize,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        let mut v = vec![0f32; self.dim];
        for (i, token) in text.to_lowercase().split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashingProvider {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        Some(self.embed_sync(text))
    }
}
