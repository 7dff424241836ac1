use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("docx parse error: {0}")]
    DocxParse(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("no readable text in {0}")]
    NoText(String),

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("html parse error: {0}")]
    Html(String),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
