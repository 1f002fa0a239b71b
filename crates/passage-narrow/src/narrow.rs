//! Beam-style recursive narrowing over a segmentation tree.
//!
//! At each level the input is segmented, every segment is scored against
//! the query vector, and only the `top_k` best segments are recursed
//! into. Embedding cost is bounded by segments-per-level times depth
//! rather than growing with text size.

use passage_core::cancel::CancelFlag;
use passage_core::error::Result;
use passage_core::similarity::cosine;
use passage_core::traits::{EmbedProvider, Segmenter};
use passage_core::types::ScoredResult;

/// Rank value for segments whose similarity is undefined (zero-magnitude
/// embedding). Sorts below every real cosine score.
const UNDEFINED_RANK: f32 = f32::NEG_INFINITY;

const DEFAULT_MIN_SEGMENT_LEN: usize = 10;

/// One narrowing run over single text units. Borrows its collaborators;
/// construct per search call.
pub struct NarrowingSearch<'a> {
    provider: &'a dyn EmbedProvider,
    segmenter: &'a dyn Segmenter,
    min_segment_len: usize,
    cancel: CancelFlag,
}

impl<'a> NarrowingSearch<'a> {
    pub fn new(provider: &'a dyn EmbedProvider, segmenter: &'a dyn Segmenter) -> Self {
        Self {
            provider,
            segmenter,
            min_segment_len: DEFAULT_MIN_SEGMENT_LEN,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_min_segment_len(mut self, min_segment_len: usize) -> Self {
        self.min_segment_len = min_segment_len;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Recursively narrows `text` toward its highest-scoring passages.
    ///
    /// Returns leaf results concatenated in beam rank order. A segment
    /// whose embedding fails is excluded from ranking at its level; a
    /// level where every segment fails contributes nothing. Only a
    /// dimension mismatch aborts the search.
    pub fn narrow(
        &self,
        text: &str,
        query: &[f32],
        depth: usize,
        top_k: usize,
    ) -> Result<Vec<ScoredResult>> {
        let mut out = Vec::new();
        self.narrow_into(text, query, depth, top_k, None, &mut out)?;
        Ok(out)
    }

    /// As [`narrow`](Self::narrow), but the caller has already scored
    /// `text` (e.g. the corpus driver's coarse pass) and the unsplit
    /// base case reuses that score instead of re-embedding.
    pub fn narrow_seeded(
        &self,
        text: &str,
        query: &[f32],
        depth: usize,
        top_k: usize,
        seed_score: f32,
    ) -> Result<Vec<ScoredResult>> {
        let mut out = Vec::new();
        self.narrow_into(text, query, depth, top_k, Some(seed_score), &mut out)?;
        Ok(out)
    }

    fn narrow_into(
        &self,
        text: &str,
        query: &[f32],
        depth: usize,
        top_k: usize,
        prior: Option<f32>,
        out: &mut Vec<ScoredResult>,
    ) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Ok(());
        }
        let trimmed = text.trim();
        if depth == 0 || trimmed.chars().count() < self.min_segment_len {
            return self.emit_leaf(trimmed, query, prior, out);
        }

        let segments = self.segmenter.segment(text);
        if segments.is_empty() {
            // Unsegmentable input above the length floor: score it whole.
            return self.emit_leaf(trimmed, query, prior, out);
        }

        let mut ranked = self.score_segments(&segments, query)?;
        if ranked.is_empty() {
            tracing::warn!(
                segments = segments.len(),
                "every segment failed to embed; dropping branch"
            );
            return Ok(());
        }

        // Stable sort keeps original segment order on ties.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_k);

        for (segment, score) in ranked {
            if self.cancel.is_cancelled() {
                return Ok(());
            }
            self.narrow_into(&segment, query, depth - 1, top_k, Some(score), out)?;
        }
        Ok(())
    }

    fn emit_leaf(
        &self,
        text: &str,
        query: &[f32],
        prior: Option<f32>,
        out: &mut Vec<ScoredResult>,
    ) -> Result<()> {
        let score = match prior {
            Some(score) => score,
            None => match self.provider.embed(text) {
                Ok(vector) => cosine(&vector, query)?.unwrap_or(UNDEFINED_RANK),
                Err(e) => {
                    tracing::warn!(error = %e, "leaf embedding failed; dropping result");
                    return Ok(());
                }
            },
        };
        out.push(ScoredResult { text: text.to_string(), score });
        Ok(())
    }

    fn score_segments(&self, segments: &[String], query: &[f32]) -> Result<Vec<(String, f32)>> {
        let embedded = self.provider.embed_many(segments);
        let mut scored = Vec::with_capacity(segments.len());
        for (segment, embedded) in segments.iter().zip(embedded) {
            match embedded {
                Ok(vector) => {
                    let score = cosine(&vector, query)?.unwrap_or(UNDEFINED_RANK);
                    scored.push((segment.clone(), score));
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        segment_len = segment.len(),
                        "segment embedding failed; excluded from ranking"
                    );
                }
            }
        }
        Ok(scored)
    }
}
