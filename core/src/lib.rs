use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod index;
pub mod ranking;
pub mod scoring;
pub mod search;
pub mod sentence;
pub mod store;
pub mod tokenizer;

pub use config::{SearchSettings, VectorizerConfig};
pub use error::{DocumentError, SearchError};
pub use index::{SparseVector, TermMatrix, TfidfVectorizer};
pub use ranking::rank;
pub use scoring::cosine_scores;
pub use search::{search, search_corpus, SearchOutcome};
pub use sentence::split_sentences;
pub use store::{Corpus, DocumentStore};
pub use tokenizer::normalize;

/// Where a document came from. Web documents always carry their URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Source {
    File,
    Web { url: String },
}

impl Source {
    pub fn url(&self) -> Option<&str> {
        match self {
            Source::File => None,
            Source::Web { url } => Some(url),
        }
    }

    pub fn is_web(&self) -> bool {
        matches!(self, Source::Web { .. })
    }
}

/// An ingested document. `sentences[i]` is the normalized form of
/// `original_sentences[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    title: String,
    content: String,
    sentences: Vec<String>,
    original_sentences: Vec<String>,
    source: Source,
}

impl Document {
    /// Split `content` into sentences and normalize each one.
    pub fn from_text(title: impl Into<String>, content: impl Into<String>, source: Source) -> Self {
        let content = content.into();
        let original_sentences = split_sentences(&content);
        let sentences = original_sentences.iter().map(|s| normalize(s)).collect();
        Self { title: title.into(), content, sentences, original_sentences, source }
    }

    /// Build a document from already split sentences; content is their join.
    pub fn from_sentences<S: Into<String>>(title: impl Into<String>, original_sentences: Vec<S>, source: Source) -> Self {
        let original_sentences: Vec<String> = original_sentences.into_iter().map(Into::into).collect();
        let sentences = original_sentences.iter().map(|s| normalize(s)).collect();
        let content = original_sentences.join(" ");
        Self { title: title.into(), content, sentences, original_sentences, source }
    }

    /// Assemble a document from parts produced elsewhere. Both sentence lists
    /// must have the same length.
    pub fn from_parts(
        title: String,
        content: String,
        sentences: Vec<String>,
        original_sentences: Vec<String>,
        source: Source,
    ) -> Result<Self, DocumentError> {
        if sentences.len() != original_sentences.len() {
            return Err(DocumentError::MisalignedSentences {
                normalized: sentences.len(),
                original: original_sentences.len(),
            });
        }
        Ok(Self { title, content, sentences, original_sentences, source })
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn content(&self) -> &str { &self.content }
    pub fn sentences(&self) -> &[String] { &self.sentences }
    pub fn original_sentences(&self) -> &[String] { &self.original_sentences }
    pub fn source(&self) -> &Source { &self.source }
    pub fn url(&self) -> Option<&str> { self.source.url() }
    pub fn len(&self) -> usize { self.sentences.len() }
    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

/// Metadata for one indexed sentence, aligned with a row of the term matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusRecord {
    pub title: String,
    pub original_sentence: String,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub score: f64,
    pub title: String,
    pub sentence: String,
    pub source: Source,
}
