use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot build an index over zero sentences")]
    EmptyCorpus,

    #[error("invalid search settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("sentence lists differ in length: {normalized} normalized vs {original} original")]
    MisalignedSentences { normalized: usize, original: usize },
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
