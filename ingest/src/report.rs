use crate::error::IngestError;
use crate::file::extract_file;
use crate::web::WebFetcher;
use phrase_core::{Document, DocumentStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether failed ingestion is handed back to the caller or only logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Surface,
    Suppress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestFailure {
    /// File path or URL that could not be ingested.
    pub origin: String,
    pub reason: String,
}

impl IngestFailure {
    pub fn new(origin: impl Into<String>, err: &IngestError) -> Self {
        Self { origin: origin.into(), reason: err.to_string() }
    }
}

/// Outcome of one ingestion batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub documents: Vec<Document>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn record(&mut self, origin: impl Into<String>, outcome: Result<Document, IngestError>) {
        match outcome {
            Ok(doc) => self.documents.push(doc),
            Err(err) => self.failures.push(IngestFailure::new(origin, &err)),
        }
    }

    pub fn merge(&mut self, other: IngestReport) {
        self.documents.extend(other.documents);
        self.failures.extend(other.failures);
    }

    /// Append the successful documents to `store` and return the failures the
    /// policy lets through. Every failure is logged either way.
    pub fn commit(self, store: &mut DocumentStore, policy: FailurePolicy) -> Vec<IngestFailure> {
        for failure in &self.failures {
            tracing::warn!(origin = %failure.origin, reason = %failure.reason, "ingestion failed");
        }
        tracing::info!(added = self.documents.len(), failed = self.failures.len(), "ingestion batch committed");
        store.extend(self.documents);
        match policy {
            FailurePolicy::Surface => self.failures,
            FailurePolicy::Suppress => Vec::new(),
        }
    }
}

/// Extract each file, pairing it with `titles[i]` when one was given.
pub fn ingest_files(paths: &[PathBuf], titles: &[Option<String>]) -> IngestReport {
    let mut report = IngestReport::default();
    for (idx, path) in paths.iter().enumerate() {
        let title = titles.get(idx).and_then(|t| t.as_deref());
        report.record(path.display().to_string(), extract_file(path, title));
    }
    report
}

/// Fetch URLs one after another; blank lines are skipped.
pub async fn ingest_urls<S: AsRef<str>>(fetcher: &WebFetcher, urls: &[S]) -> IngestReport {
    let mut report = IngestReport::default();
    for url in urls.iter().map(|u| u.as_ref().trim()).filter(|u| !u.is_empty()) {
        report.record(url, fetcher.fetch(url).await);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrase_core::Source;

    fn report_with_failure() -> IngestReport {
        let mut report = IngestReport::default();
        report.record("a.txt", Ok(Document::from_text("a.txt", "Alpha beta.", Source::File)));
        report.record("b.xlsx", Err(IngestError::UnsupportedFormat("b.xlsx".into())));
        report
    }

    #[test]
    fn surface_returns_failures_and_keeps_documents() {
        let mut store = DocumentStore::new();
        let failures = report_with_failure().commit(&mut store, FailurePolicy::Surface);
        assert_eq!(store.len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].origin, "b.xlsx");
        assert!(failures[0].reason.contains("unsupported"));
    }

    #[test]
    fn suppress_hides_failures_but_never_touches_the_store_for_them() {
        let mut store = DocumentStore::new();
        let failures = report_with_failure().commit(&mut store, FailurePolicy::Suppress);
        assert!(failures.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).map(|d| d.title()), Some("a.txt"));
    }

    #[test]
    fn missing_files_become_failures() {
        let report = ingest_files(&[PathBuf::from("/definitely/not/here.txt")], &[]);
        assert!(report.documents.is_empty());
        assert_eq!(report.failures.len(), 1);
    }
}
