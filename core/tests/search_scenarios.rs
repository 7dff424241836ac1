use phrase_core::index::TfidfVectorizer;
use phrase_core::{normalize, search, Document, DocumentStore, SearchError, SearchSettings, Source, VectorizerConfig};
use proptest::prelude::*;

fn store_of(docs: Vec<Document>) -> DocumentStore {
    docs.into_iter().collect()
}

#[test]
fn cat_query_finds_the_cat_sentence() {
    let store = store_of(vec![Document::from_sentences(
        "pets",
        vec!["The cat sat on the mat.", "Dogs bark loudly at night."],
        Source::File,
    )]);
    let outcome = search(&store, "cat mat", &SearchSettings::new(10, 0.15)).unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].sentence, "The cat sat on the mat.");
    assert!(outcome.results[0].score > 0.0);
    assert_eq!(outcome.sentences_indexed, 2);
    assert_eq!(outcome.total_hits, 1);

    let everything = search(&store, "cat mat", &SearchSettings::new(10, 0.0)).unwrap();
    assert_eq!(everything.results.len(), 2);
    assert_eq!(everything.results[1].sentence, "Dogs bark loudly at night.");
    assert!(everything.results[1].score.abs() < 1e-12);
}

#[test]
fn empty_store_signals_empty_corpus() {
    let err = search(&DocumentStore::new(), "anything", &SearchSettings::default()).unwrap_err();
    assert!(matches!(err, SearchError::EmptyCorpus));
}

#[test]
fn documents_without_sentences_are_an_empty_corpus() {
    let store = store_of(vec![Document::from_text("blank", "   ", Source::File)]);
    let err = search(&store, "anything", &SearchSettings::default()).unwrap_err();
    assert!(matches!(err, SearchError::EmptyCorpus));
}

#[test]
fn unrelated_query_returns_nothing_regardless_of_limit() {
    let store = store_of(vec![Document::from_text(
        "pets",
        "The cat sat on the mat. Dogs bark loudly at night.",
        Source::File,
    )]);
    for limit in [1, 5, 20] {
        let outcome = search(&store, "quantum chromodynamics", &SearchSettings::new(limit, 0.15)).unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.total_hits, 0);
    }
}

#[test]
fn stopword_only_query_is_silently_empty() {
    let store = store_of(vec![Document::from_text("pets", "The cat sat on the mat.", Source::File)]);
    let outcome = search(&store, "the and of", &SearchSettings::new(5, 0.01)).unwrap();
    assert!(outcome.results.is_empty());
}

#[test]
fn tied_scores_keep_first_seen_order() {
    let store = store_of(vec![
        Document::from_sentences("first", vec!["Rust compiles fast code."], Source::File),
        Document::from_sentences("filler", vec!["Gardens need water."], Source::File),
        Document::from_sentences(
            "second",
            vec!["Rust compiles fast code."],
            Source::Web { url: "https://example.com/rust".into() },
        ),
    ]);
    let outcome = search(&store, "rust code", &SearchSettings::new(10, 0.1)).unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].score, outcome.results[1].score);
    assert_eq!(outcome.results[0].title, "first");
    assert_eq!(outcome.results[1].title, "second");
    assert_eq!(outcome.results[1].source.url(), Some("https://example.com/rust"));
}

#[test]
fn limit_truncates_sorted_results() {
    let store = store_of(vec![Document::from_text(
        "garden",
        "Tomatoes need sun. Tomatoes need water and sun. Roses need pruning. Tomatoes grow fast.",
        Source::File,
    )]);
    let outcome = search(&store, "tomatoes sun", &SearchSettings::new(2, 0.0)).unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.results[0].score >= outcome.results[1].score);
    assert_eq!(outcome.results[0].sentence, "Tomatoes need sun.");
    assert_eq!(outcome.total_hits, 4);
}

#[test]
fn invalid_threshold_is_rejected() {
    let store = store_of(vec![Document::from_text("t", "Some text here.", Source::File)]);
    let err = search(&store, "text", &SearchSettings::new(3, 2.0)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidSettings(_)));
}

proptest! {
    #[test]
    fn out_of_vocabulary_tokens_leave_the_query_vector_unchanged(
        sentences in prop::collection::vec("[a-z]{2,6}( [a-z]{2,6}){0,5}", 1..12),
        query in "[a-z]{2,8}( [a-z]{2,8}){0,4}",
    ) {
        let normalized: Vec<String> = sentences.iter().map(|s| normalize(s)).collect();
        let (model, matrix) = TfidfVectorizer::fit_transform(VectorizerConfig::default(), &normalized).unwrap();
        let processed = normalize(&query);
        let vector = model.transform(&processed);
        // longer than any training word, so neither it nor its bigrams are features
        let padded = model.transform(&format!("{processed} zzzqqqxx"));
        prop_assert_eq!(&padded, &vector);
        prop_assert!(vector.indices().iter().all(|tid| (*tid as usize) < matrix.n_terms()));
    }
}
