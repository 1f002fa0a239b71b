//! Concurrent dispatch for batch embedding.

use anyhow::{anyhow, Result};
use std::sync::Arc;

use passage_core::traits::EmbedProvider;

/// Fans each item of `embed_many` out as a blocking task on an owned
/// runtime and joins them in input order, so batch results stay
/// position-stable no matter which call finishes first.
pub struct ParallelProvider {
    inner: Arc<dyn EmbedProvider>,
    runtime: tokio::runtime::Runtime,
}

impl ParallelProvider {
    pub fn new(inner: Arc<dyn EmbedProvider>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self { inner, runtime })
    }
}

impl EmbedProvider for ParallelProvider {
    fn embedder_id(&self) -> &str {
        self.inner.embedder_id()
    }

    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inner.embed(text)
    }

    fn embed_many(&self, texts: &[String]) -> Vec<Result<Vec<f32>>> {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| {
                let inner = Arc::clone(&self.inner);
                let text = t.clone();
                self.runtime.spawn_blocking(move || inner.embed(&text))
            })
            .collect();
        let joined = self.runtime.block_on(futures::future::join_all(handles));
        joined
            .into_iter()
            .map(|r| match r {
                Ok(res) => res,
                Err(e) => Err(anyhow!("embedding task failed: {e}")),
            })
            .collect()
    }
}
