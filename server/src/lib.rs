use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use phrase_core::{normalize, search_corpus, DocumentStore, SearchSettings, Source};
use phrase_ingest::{extract_bytes, ingest_urls, FailurePolicy, IngestFailure, IngestReport, WebFetcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;

pub use error::{ApiError, NO_DOCUMENTS};

/// Upper bound on `k` regardless of what the client asks for.
pub const MAX_RESULTS: usize = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub defaults: SearchSettings,
    pub failure_policy: FailurePolicy,
    pub fetch_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            defaults: SearchSettings::default(),
            failure_policy: FailurePolicy::Surface,
            fetch_timeout: Duration::from_secs(phrase_ingest::DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DocumentStore>>,
    pub fetcher: WebFetcher,
    pub defaults: SearchSettings,
    pub failure_policy: FailurePolicy,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
    pub threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub sentences_indexed: usize,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub score: f64,
    pub title: String,
    pub sentence: String,
    pub highlighted: String,
    pub source: Source,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub index: usize,
    pub title: String,
    pub source: Source,
    pub sentences: usize,
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub added: Vec<DocumentSummary>,
    pub failures: Vec<IngestFailure>,
}

#[derive(Deserialize)]
pub struct WebIngestRequest {
    pub urls: Vec<String>,
}

#[derive(Deserialize)]
pub struct FileParams {
    pub name: String,
    pub title: Option<String>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    config.defaults.validate()?;
    let app_state = AppState {
        store: Arc::new(RwLock::new(DocumentStore::new())),
        fetcher: WebFetcher::new(config.fetch_timeout)?,
        defaults: config.defaults,
        failure_policy: config.failure_policy,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/documents", get(list_documents).delete(clear_documents))
        .route("/documents/:index", delete(remove_document))
        .route("/documents/web", post(ingest_web))
        .route("/documents/file", post(ingest_file))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let settings = SearchSettings {
        num_results: params.k.unwrap_or(state.defaults.num_results).min(MAX_RESULTS),
        threshold: params.threshold.unwrap_or(state.defaults.threshold),
        vectorizer: state.defaults.vectorizer,
    };

    // Snapshot under the read lock; the index is rebuilt without holding it.
    let corpus = state.store.read().corpus();
    let query = params.q.clone();
    let outcome = tokio::task::spawn_blocking(move || search_corpus(&corpus, &query, &settings))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    // Highlight only the raw words that survive normalization.
    let raw_terms: Vec<&str> = params.q.split_whitespace().filter(|t| !normalize(t).is_empty()).collect();
    let results = outcome
        .results
        .into_iter()
        .map(|r| SearchHit {
            highlighted: highlight_terms(&r.sentence, &raw_terms),
            score: r.score,
            title: r.title,
            sentence: r.sentence,
            source: r.source,
        })
        .collect();

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse {
        query: params.q,
        took_s: elapsed.as_secs_f64(),
        sentences_indexed: outcome.sentences_indexed,
        total_hits: outcome.total_hits,
        results,
    }))
}

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let store = state.store.read();
    Json(summaries(&store, 0))
}

pub async fn clear_documents(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut store = state.store.write();
    let removed = store.len();
    store.clear();
    tracing::info!(removed, "session cleared");
    Json(serde_json::json!({ "removed": removed }))
}

pub async fn remove_document(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DocumentSummary>, ApiError> {
    let removed = state
        .store
        .write()
        .remove(index)
        .ok_or_else(|| ApiError::NotFound(format!("no document at index {index}")))?;
    Ok(Json(DocumentSummary {
        index,
        title: removed.title().to_string(),
        source: removed.source().clone(),
        sentences: removed.len(),
    }))
}

pub async fn ingest_web(
    State(state): State<AppState>,
    Json(req): Json<WebIngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    if req.urls.iter().all(|u| u.trim().is_empty()) {
        return Err(ApiError::BadRequest("no urls given".into()));
    }
    let report = ingest_urls(&state.fetcher, req.urls.as_slice()).await;
    Ok(Json(commit(&state, report)))
}

pub async fn ingest_file(
    State(state): State<AppState>,
    Query(params): Query<FileParams>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    if params.name.trim().is_empty() {
        return Err(ApiError::BadRequest("file name is required".into()));
    }
    // PDF and DOCX parsing is CPU-bound; keep it off the async workers.
    let name = params.name.clone();
    let extracted = tokio::task::spawn_blocking(move || extract_bytes(&name, &body, params.title.as_deref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let mut report = IngestReport::default();
    report.record(params.name, extracted);
    Ok(Json(commit(&state, report)))
}

/// Extraction has already happened; only the append runs under the write lock.
fn commit(state: &AppState, report: IngestReport) -> IngestResponse {
    let mut store = state.store.write();
    let before = store.len();
    let failures = report.commit(&mut store, state.failure_policy);
    IngestResponse { added: summaries(&store, before), failures }
}

fn summaries(store: &DocumentStore, from: usize) -> Vec<DocumentSummary> {
    store
        .iter()
        .enumerate()
        .skip(from)
        .map(|(index, doc)| DocumentSummary {
            index,
            title: doc.title().to_string(),
            source: doc.source().clone(),
            sentences: doc.len(),
        })
        .collect()
}

/// Wrap case-insensitive occurrences of any term in `<em>`. The sentence is
/// HTML-escaped, so the only markup in the output is the inserted tags.
pub fn highlight_terms(sentence: &str, terms: &[&str]) -> String {
    let mut terms: Vec<&str> = terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    // longest first so "cats" wins over "cat" at the same position
    terms.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    let pat = match regex::RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(pat) if !terms.is_empty() => pat,
        _ => return escape_html(sentence),
    };

    let mut out = String::with_capacity(sentence.len() + 16);
    let mut last = 0;
    for m in pat.find_iter(sentence) {
        out.push_str(&escape_html(&sentence[last..m.start()]));
        out.push_str("<em>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</em>");
        last = m.end();
    }
    out.push_str(&escape_html(&sentence[last..]));
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
