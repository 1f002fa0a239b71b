//! Domain types shared by the segmenters, embedding providers and search
//! engines.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type DocId = String;
pub type Vector = Vec<f32>;

/// A corpus document.
///
/// - `id`: stable document identity (file stem or external id)
/// - `path`: where the text came from, for display only
/// - `text`: the full body
///
/// Documents are loaded once per corpus session and never mutated by a
/// search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub path: String,
    pub text: String,
}

/// A leaf-level finding of the narrowing search: a passage and its
/// similarity against the query. Higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub text: String,
    pub score: f32,
}

/// A corpus-level result. `doc_id` names the document the passage was
/// found in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub text: String,
    pub score: f32,
}

/// Knobs for one search call. Fixed for the duration of the call so
/// results are deterministic for a given embedder and segmenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Recursion depth; 0 scores the input without splitting.
    pub depth: usize,
    /// Beam width: how many segments to recurse into per level.
    pub top_k: usize,
    /// How many final results a corpus search returns, and how many
    /// documents the coarse pass keeps.
    pub results: usize,
    /// Segments whose trimmed length falls below this are not re-split.
    pub min_segment_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 2, top_k: 2, results: 3, min_segment_len: 10 }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if self.results == 0 {
            return Err(Error::InvalidConfig("results must be at least 1".to_string()));
        }
        Ok(())
    }
}
