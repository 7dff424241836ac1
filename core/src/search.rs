use crate::config::SearchSettings;
use crate::error::SearchError;
use crate::index::TfidfVectorizer;
use crate::ranking::rank;
use crate::scoring::cosine_scores;
use crate::store::{Corpus, DocumentStore};
use crate::tokenizer::normalize;
use crate::RankedResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    /// Sentences that were indexed for this query.
    pub sentences_indexed: usize,
    pub vocabulary_size: usize,
    /// Sentences at or above the threshold, before truncation.
    pub total_hits: usize,
}

/// Rebuild the index over the current store and rank its sentences against `query`.
pub fn search(store: &DocumentStore, query: &str, settings: &SearchSettings) -> Result<SearchOutcome, SearchError> {
    search_corpus(&store.corpus(), query, settings)
}

/// Same as [`search`] over an already taken corpus snapshot.
pub fn search_corpus(corpus: &Corpus, query: &str, settings: &SearchSettings) -> Result<SearchOutcome, SearchError> {
    let settings = settings.validate()?;
    if corpus.is_empty() {
        return Err(SearchError::EmptyCorpus);
    }

    let (model, matrix) = TfidfVectorizer::fit_transform(settings.vectorizer, &corpus.sentences)?;
    let processed = normalize(query);
    let query_vector = model.transform(&processed);
    let scores = cosine_scores(&query_vector, &matrix);
    let total_hits = scores.iter().filter(|s| **s >= settings.threshold).count();
    let results = rank(&scores, &corpus.records, settings.num_results, settings.threshold);

    tracing::debug!(
        query = %processed,
        sentences = corpus.len(),
        vocabulary = model.vocabulary_len(),
        query_terms = query_vector.nnz(),
        total_hits,
        returned = results.len(),
        "ranked sentences"
    );

    Ok(SearchOutcome { results, sentences_indexed: corpus.len(), vocabulary_size: model.vocabulary_len(), total_hits })
}
