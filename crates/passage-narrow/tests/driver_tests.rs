use passage_core::cancel::CancelFlag;
use passage_core::error::Error;
use passage_core::types::{Document, SearchConfig};
use passage_embed::StaticProvider;
use passage_narrow::CorpusSearch;
use passage_segment::SentenceSegmenter;

fn doc(id: &str, text: &str) -> Document {
    Document { id: id.to_string(), path: format!("{id}.txt"), text: text.to_string() }
}

fn engine(provider: StaticProvider, config: SearchConfig) -> CorpusSearch {
    CorpusSearch::new(Box::new(provider), Box::new(SentenceSegmenter), config).unwrap()
}

/// Three documents, n=2: a document ranked third in the coarse pass
/// never contributes, even though it holds the best sentence overall.
#[test]
fn coarse_pass_excludes_documents_outside_top_n() {
    let docs = vec![
        doc("alpha", "Alpha one fact. Alpha two fact."),
        doc("bravo", "Bravo one fact. Bravo two fact."),
        doc("charlie", "Charlie one fact. Charlie two fact."),
    ];
    let provider = StaticProvider::new(3)
        .with("find the facts", vec![1.0, 0.0, 0.0])
        .with("Alpha one fact. Alpha two fact.", vec![1.0, 0.0, 0.0])
        .with("Bravo one fact. Bravo two fact.", vec![0.8, 0.6, 0.0])
        .with("Charlie one fact. Charlie two fact.", vec![0.0, 1.0, 0.0])
        .with("Alpha one fact.", vec![0.8, 0.6, 0.0])
        .with("Alpha two fact.", vec![0.6, 0.8, 0.0])
        .with("Bravo one fact.", vec![0.0, 1.0, 0.0])
        .with("Bravo two fact.", vec![0.28, 0.96, 0.0])
        // The strongest sentence in the corpus, in the weakest document.
        .with("Charlie one fact.", vec![1.0, 0.0, 0.0])
        .with("Charlie two fact.", vec![0.0, 1.0, 0.0]);

    let engine = engine(provider, SearchConfig { depth: 1, top_k: 1, results: 2, min_segment_len: 10 });
    let hits = engine.search(&docs, "find the facts").unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.doc_id != "charlie"));
    assert_eq!(hits[0].doc_id, "alpha");
    assert_eq!(hits[0].text, "Alpha one fact.");
    assert!((hits[0].score - 0.8).abs() < 1e-5);
    assert_eq!(hits[1].text, "Bravo two fact.");
}

#[test]
fn end_to_end_sky_scenario() {
    let docs = vec![
        doc("doc1", "The sky is blue. Water is wet."),
        doc("doc2", "Cats are mammals. Dogs bark loudly."),
    ];
    let provider = StaticProvider::new(2)
        .with("What color is the sky?", vec![1.0, 0.0])
        .with("The sky is blue. Water is wet.", vec![0.6, 0.8])
        .with("Cats are mammals. Dogs bark loudly.", vec![0.0, 1.0])
        .with("The sky is blue.", vec![1.0, 0.0])
        .with("Water is wet.", vec![0.0, 1.0]);

    let engine = engine(provider, SearchConfig { depth: 1, top_k: 1, results: 1, min_segment_len: 10 });
    let hits = engine.search(&docs, "What color is the sky?").unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, "doc1");
    assert_eq!(hits[0].text, "The sky is blue.");
    assert!((hits[0].score - 1.0).abs() < 1e-5);
}

#[test]
fn flat_document_search_returns_whole_bodies() {
    let docs = vec![
        doc("alpha", "Alpha one fact. Alpha two fact."),
        doc("bravo", "Bravo one fact. Bravo two fact."),
        doc("charlie", "Charlie one fact. Charlie two fact."),
    ];
    let provider = StaticProvider::new(3)
        .with("find the facts", vec![1.0, 0.0, 0.0])
        .with("Alpha one fact. Alpha two fact.", vec![0.6, 0.8, 0.0])
        .with("Bravo one fact. Bravo two fact.", vec![1.0, 0.0, 0.0])
        .with("Charlie one fact. Charlie two fact.", vec![0.0, 1.0, 0.0]);

    let engine = engine(provider, SearchConfig { results: 2, ..SearchConfig::default() });
    let hits = engine.search_documents(&docs, "find the facts").unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc_id, "bravo");
    assert_eq!(hits[0].text, "Bravo one fact. Bravo two fact.");
    assert_eq!(hits[1].doc_id, "alpha");
}

#[test]
fn failed_document_embedding_is_excluded_not_fatal() {
    let docs = vec![
        doc("alpha", "Alpha one fact. Alpha two fact."),
        doc("broken", "This body has no registered embedding."),
    ];
    let provider = StaticProvider::new(3)
        .with("find the facts", vec![1.0, 0.0, 0.0])
        .with("Alpha one fact. Alpha two fact.", vec![1.0, 0.0, 0.0])
        .with("Alpha one fact.", vec![0.8, 0.6, 0.0])
        .with("Alpha two fact.", vec![0.6, 0.8, 0.0]);

    let engine = engine(provider, SearchConfig { depth: 1, top_k: 1, results: 2, min_segment_len: 10 });
    let hits = engine.search(&docs, "find the facts").unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, "alpha");
}

#[test]
fn empty_corpus_is_an_error() {
    let provider = StaticProvider::new(3).with("query", vec![1.0, 0.0, 0.0]);
    let engine = engine(provider, SearchConfig::default());
    assert!(matches!(engine.search(&[], "query"), Err(Error::EmptyCorpus)));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let provider = StaticProvider::new(3);
    let result = CorpusSearch::new(
        Box::new(provider),
        Box::new(SentenceSegmenter),
        SearchConfig { top_k: 0, ..SearchConfig::default() },
    );
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn unavailable_query_embedding_is_an_error() {
    let docs = vec![doc("alpha", "Alpha one fact.")];
    let provider = StaticProvider::new(3).with("Alpha one fact.", vec![1.0, 0.0, 0.0]);
    let engine = engine(provider, SearchConfig::default());
    let result = engine.search(&docs, "unregistered query");
    assert!(matches!(result, Err(Error::EmbeddingUnavailable(_))));
}

#[test]
fn cancelled_search_returns_partial_results_not_an_error() {
    let docs = vec![doc("alpha", "Alpha one fact. Alpha two fact.")];
    let provider = StaticProvider::new(3)
        .with("find the facts", vec![1.0, 0.0, 0.0])
        .with("Alpha one fact. Alpha two fact.", vec![1.0, 0.0, 0.0]);

    let engine = engine(provider, SearchConfig::default());
    let cancel = CancelFlag::new();
    cancel.cancel();
    let hits = engine.search_with_cancel(&docs, "find the facts", &cancel).unwrap();
    assert!(hits.is_empty());
}
