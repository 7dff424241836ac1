//! Ingestion collaborators: turn files and web pages into documents for the
//! phrase index.

pub mod docx;
pub mod error;
pub mod file;
pub mod html;
pub mod report;
pub mod web;

pub use docx::docx_text;
pub use error::IngestError;
pub use file::{discover_files, extract_bytes, extract_file, parse_titles, FileKind};
pub use html::{extract_html, HtmlText};
pub use report::{ingest_files, ingest_urls, FailurePolicy, IngestFailure, IngestReport};
pub use web::{parse_url, WebFetcher, DEFAULT_TIMEOUT_SECS};
