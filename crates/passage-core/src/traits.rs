use crate::types::Document;

/// The one external capability the search engines depend on: text in,
/// fixed-dimension vector out.
pub trait EmbedProvider: Send + Sync {
    /// Stable identifier for the provider/model (e.g., `hash:xx64:d256`).
    fn embedder_id(&self) -> &str;
    /// Embedding dimensionality.
    fn dim(&self) -> usize;
    /// Compute the embedding for a single text unit.
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
    /// Compute embeddings for a batch. One result per input, in input
    /// order; a failed item must not fail the batch.
    fn embed_many(&self, texts: &[String]) -> Vec<anyhow::Result<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Splits a text unit into smaller ordered units. Implementations must
/// be stateless: segmenting the same input twice yields the same output.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Supplies the documents a corpus search runs over.
pub trait DocumentSource {
    fn load(&self) -> anyhow::Result<Vec<Document>>;
}
