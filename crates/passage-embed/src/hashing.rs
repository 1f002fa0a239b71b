//! Deterministic token-hash embedder for offline runs and tests.

use anyhow::Result;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use passage_core::similarity::normalize_l2;
use passage_core::traits::EmbedProvider;

/// Maps each whitespace token to a bucket by hash and L2-normalizes the
/// result. Not a real embedding model, but deterministic and cheap,
/// which is what offline search and the test suite need.
pub struct HashingProvider {
    dim: usize,
    id: String,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim, id: format!("hash:xx64:d{dim}") }
    }
}

impl EmbedProvider for HashingProvider {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        normalize_l2(&mut v);
        Ok(v)
    }
}
