//! Exact-text embedding registry for tests and canned demos.

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use passage_core::traits::EmbedProvider;

/// Returns a pre-registered vector per exact input string. Unknown text
/// is an error, which doubles as failure injection when exercising the
/// search engines' partial-failure paths.
pub struct StaticProvider {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
    id: String,
}

impl StaticProvider {
    pub fn new(dim: usize) -> Self {
        Self { vectors: HashMap::new(), dim, id: format!("static:d{dim}") }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.insert(text, vector);
        self
    }

    pub fn insert(&mut self, text: &str, vector: Vec<f32>) {
        self.vectors.insert(text.to_string(), vector);
    }
}

impl EmbedProvider for StaticProvider {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| anyhow!("no embedding registered for {text:?}"))
    }
}
