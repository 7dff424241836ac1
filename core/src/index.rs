use crate::config::VectorizerConfig;
use crate::error::SearchError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid regex");
}

pub type TermId = u32;

/// Sparse row vector; indices are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<TermId>,
    values: Vec<f64>,
}

impl SparseVector {
    fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.sort_unstable_by_key(|(id, _)| *id);
        let (indices, values) = entries.into_iter().unzip();
        Self { indices, values }
    }

    pub fn nnz(&self) -> usize { self.indices.len() }
    pub fn is_zero(&self) -> bool { self.values.iter().all(|v| *v == 0.0) }
    pub fn indices(&self) -> &[TermId] { &self.indices }
    pub fn values(&self) -> &[f64] { &self.values }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, term: TermId) -> Option<f64> {
        self.indices.binary_search(&term).ok().map(|pos| self.values[pos])
    }

    pub fn norm(&self) -> f64 { self.values.iter().map(|v| v * v).sum::<f64>().sqrt() }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for v in self.values.iter_mut() { *v /= norm; }
        }
        self
    }
}

/// Sentence-by-term TF-IDF matrix, one row per indexed sentence.
#[derive(Debug, Clone, Default)]
pub struct TermMatrix {
    rows: Vec<SparseVector>,
    n_terms: usize,
}

impl TermMatrix {
    pub fn rows(&self) -> &[SparseVector] { &self.rows }
    pub fn row(&self, i: usize) -> Option<&SparseVector> { self.rows.get(i) }
    pub fn n_rows(&self) -> usize { self.rows.len() }
    pub fn n_terms(&self) -> usize { self.n_terms }
}

/// Fitted TF-IDF model: vocabulary plus smoothed idf weights.
///
/// Weights are `(1 + ln tf) * idf` with `idf = ln((1 + n) / (1 + df)) + 1`,
/// and every produced vector is L2-normalized. Queries must go through
/// [`TfidfVectorizer::transform`] on the fitted model so they land in the same
/// space as the matrix.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: HashMap<String, TermId>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit on normalized sentences and return the model with the sentence matrix.
    pub fn fit_transform<S: AsRef<str>>(config: VectorizerConfig, sentences: &[S]) -> Result<(Self, TermMatrix), SearchError> {
        if sentences.is_empty() {
            return Err(SearchError::EmptyCorpus);
        }
        let config = config.validate()?;
        let analyzed: Vec<Vec<String>> = sentences.iter().map(|s| analyze(s.as_ref(), config.ngram_range)).collect();

        let mut df: HashMap<&str, u32> = HashMap::new();
        for terms in &analyzed {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        let seen = df.len();

        let mut ranked: Vec<(&str, u32)> = df.into_iter().collect();
        if ranked.len() > config.max_features {
            ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(config.max_features);
        }
        // Column order is alphabetical over the retained terms.
        ranked.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let n = analyzed.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (tid, (term, df_t)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), tid as TermId);
            idf.push(((1.0 + n) / (1.0 + df_t as f64)).ln() + 1.0);
        }

        let model = Self { config, vocabulary, idf };
        let rows = analyzed.iter().map(|terms| model.weigh(terms)).collect();
        let matrix = TermMatrix { rows, n_terms: model.idf.len() };
        tracing::debug!(sentences = matrix.n_rows(), seen_terms = seen, vocabulary = matrix.n_terms, "fitted tf-idf model");
        Ok((model, matrix))
    }

    /// Map normalized text into the fitted space. Terms outside the vocabulary
    /// are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, self.config.ngram_range))
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut tf: HashMap<TermId, u32> = HashMap::new();
        for term in terms {
            if let Some(&tid) = self.vocabulary.get(term) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        let entries = tf
            .into_iter()
            .map(|(tid, raw)| (tid, (1.0 + (raw as f64).ln()) * self.idf[tid as usize]))
            .collect();
        SparseVector::from_entries(entries).l2_normalized()
    }

    pub fn vocabulary_len(&self) -> usize { self.idf.len() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.vocabulary.get(term).copied() }
    pub fn idf(&self, term: &str) -> Option<f64> { self.term_id(term).map(|tid| self.idf[tid as usize]) }
    pub fn config(&self) -> &VectorizerConfig { &self.config }
}

/// Extract n-gram features: word tokens of two or more characters, joined
/// with single spaces for n > 1.
pub fn analyze(text: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = TOKEN.find_iter(text).map(|m| m.as_str()).collect();
    let (lo, hi) = ngram_range;
    let mut features = Vec::new();
    for n in lo.max(1)..=hi {
        if n > tokens.len() {
            break;
        }
        features.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigrams(max_features: usize) -> VectorizerConfig {
        VectorizerConfig { max_features, ngram_range: (1, 1) }
    }

    #[test]
    fn analyze_emits_unigrams_then_bigrams() {
        let f = analyze("cat sat mat", (1, 2));
        assert_eq!(f, vec!["cat", "sat", "mat", "cat sat", "sat mat"]);
    }

    #[test]
    fn analyze_skips_single_character_tokens() {
        assert_eq!(analyze("a cat b", (1, 2)), vec!["cat"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let empty: Vec<String> = Vec::new();
        let err = TfidfVectorizer::fit_transform(VectorizerConfig::default(), &empty).unwrap_err();
        assert!(matches!(err, SearchError::EmptyCorpus));
    }

    #[test]
    fn weights_follow_smoothed_sublinear_tfidf() {
        let (model, matrix) = TfidfVectorizer::fit_transform(unigrams(100), &["cat sat sat", "cat"]).unwrap();
        let idf_cat = model.idf("cat").unwrap();
        let idf_sat = model.idf("sat").unwrap();
        assert!((idf_cat - 1.0).abs() < 1e-12);
        assert!((idf_sat - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);

        let row = matrix.row(0).unwrap();
        let cat = row.get(model.term_id("cat").unwrap()).unwrap();
        let sat = row.get(model.term_id("sat").unwrap()).unwrap();
        let expected_sat = (1.0 + 2.0f64.ln()) * idf_sat;
        let norm = (1.0 + expected_sat * expected_sat).sqrt();
        assert!((cat - 1.0 / norm).abs() < 1e-12);
        assert!((sat - expected_sat / norm).abs() < 1e-12);
        assert!((row.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vocabulary_cap_keeps_highest_document_frequency() {
        let sentences = ["alpha beta", "alpha gamma", "alpha beta"];
        let (model, matrix) = TfidfVectorizer::fit_transform(unigrams(2), &sentences).unwrap();
        assert_eq!(model.vocabulary_len(), 2);
        assert_eq!(model.term_id("alpha"), Some(0));
        assert_eq!(model.term_id("beta"), Some(1));
        assert!(model.term_id("gamma").is_none());
        assert!(model.transform("gamma").is_zero());
        let row = matrix.row(1).unwrap();
        assert_eq!(row.nnz(), 1);
        assert!((row.values()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cap_ties_break_alphabetically() {
        let (model, _) = TfidfVectorizer::fit_transform(unigrams(1), &["zeta", "eta"]).unwrap();
        assert_eq!(model.term_id("eta"), Some(0));
        assert!(model.term_id("zeta").is_none());
    }

    #[test]
    fn bigrams_are_features() {
        let (model, _) = TfidfVectorizer::fit_transform(VectorizerConfig::default(), &["cat sat mat"]).unwrap();
        assert!(model.term_id("cat sat").is_some());
        assert!(model.term_id("sat mat").is_some());
        assert!(model.term_id("cat mat").is_none());
    }

    #[test]
    fn empty_vocabulary_is_degenerate_not_an_error() {
        let (model, matrix) = TfidfVectorizer::fit_transform(VectorizerConfig::default(), &["", "x"]).unwrap();
        assert_eq!(model.vocabulary_len(), 0);
        assert_eq!(matrix.n_rows(), 2);
        assert!(matrix.rows().iter().all(SparseVector::is_zero));
        assert!(model.transform("anything").is_zero());
    }

    #[test]
    fn dot_merges_sorted_indices() {
        let a = SparseVector::from_entries(vec![(3, 2.0), (1, 1.0)]);
        let b = SparseVector::from_entries(vec![(1, 4.0), (2, 5.0), (3, 0.5)]);
        assert_eq!(a.indices(), &[1, 3]);
        assert_eq!(a.dot(&b), 5.0);
    }
}
