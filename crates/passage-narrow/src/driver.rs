//! Corpus-level search: coarse document ranking, then per-document
//! narrowing, then one pooled re-rank.

use passage_core::cancel::CancelFlag;
use passage_core::error::{Error, Result};
use passage_core::similarity::cosine;
use passage_core::traits::{EmbedProvider, Segmenter};
use passage_core::types::{Document, SearchConfig, SearchHit};
use passage_embed::CachedProvider;

use crate::narrow::NarrowingSearch;

/// Ranks whole documents against the query, narrows the winners to
/// their best passages, and re-ranks the pooled passages. Input
/// documents are never mutated.
pub struct CorpusSearch {
    provider: Box<dyn EmbedProvider>,
    segmenter: Box<dyn Segmenter>,
    config: SearchConfig,
}

impl CorpusSearch {
    pub fn new(
        provider: Box<dyn EmbedProvider>,
        segmenter: Box<dyn Segmenter>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, segmenter, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Full search over the corpus. Returns at most `results` hits,
    /// best first.
    pub fn search(&self, documents: &[Document], query: &str) -> Result<Vec<SearchHit>> {
        self.search_with_cancel(documents, query, &CancelFlag::new())
    }

    /// As [`search`](Self::search); a cancelled flag stops the search
    /// early and returns the hits pooled so far.
    pub fn search_with_cancel(
        &self,
        documents: &[Document],
        query: &str,
        cancel: &CancelFlag,
    ) -> Result<Vec<SearchHit>> {
        // One memo per search call: the coarse-pass embedding of each
        // winning document is reused by the recursion below it.
        let provider = CachedProvider::new(self.provider.as_ref());
        let (query_vec, ranked_docs) = self.coarse_pass(&provider, documents, query)?;

        let narrowing = NarrowingSearch::new(&provider, self.segmenter.as_ref())
            .with_min_segment_len(self.config.min_segment_len)
            .with_cancel(cancel.clone());

        let mut pooled: Vec<SearchHit> = Vec::new();
        for (doc, doc_score) in ranked_docs {
            if cancel.is_cancelled() {
                tracing::info!("search cancelled; returning partial results");
                break;
            }
            let results = narrowing.narrow_seeded(
                &doc.text,
                &query_vec,
                self.config.depth,
                self.config.top_k,
                doc_score,
            )?;
            tracing::debug!(doc_id = %doc.id, results = results.len(), "narrowed document");
            pooled.extend(results.into_iter().map(|r| SearchHit {
                doc_id: doc.id.clone(),
                text: r.text,
                score: r.score,
            }));
        }

        pooled.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        pooled.truncate(self.config.results);
        Ok(pooled)
    }

    /// Coarse pass only: the top documents by whole-body similarity,
    /// each hit carrying the full document text.
    pub fn search_documents(&self, documents: &[Document], query: &str) -> Result<Vec<SearchHit>> {
        let provider = CachedProvider::new(self.provider.as_ref());
        let (_query_vec, ranked) = self.coarse_pass(&provider, documents, query)?;
        Ok(ranked
            .into_iter()
            .map(|(doc, score)| SearchHit { doc_id: doc.id.clone(), text: doc.text.clone(), score })
            .collect())
    }

    fn coarse_pass<'d>(
        &self,
        provider: &CachedProvider<'_>,
        documents: &'d [Document],
        query: &str,
    ) -> Result<(Vec<f32>, Vec<(&'d Document, f32)>)> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let query_vec = provider
            .embed(query)
            .map_err(|e| Error::EmbeddingUnavailable(format!("query embedding failed: {e}")))?;

        let bodies: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embedded = provider.embed_many(&bodies);
        let mut scored: Vec<(&Document, f32)> = Vec::with_capacity(documents.len());
        for (doc, embedded) in documents.iter().zip(embedded) {
            match embedded {
                Ok(vector) => {
                    let score = cosine(&vector, &query_vec)?.unwrap_or(f32::NEG_INFINITY);
                    scored.push((doc, score));
                }
                Err(e) => {
                    tracing::warn!(
                        doc_id = %doc.id,
                        error = %e,
                        "document embedding failed; excluded from ranking"
                    );
                }
            }
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.results);
        tracing::debug!(candidates = scored.len(), "coarse pass complete");
        Ok((query_vec, scored))
    }
}
