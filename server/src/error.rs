use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phrase_core::SearchError;
use serde_json::json;

pub const NO_DOCUMENTS: &str = "No documents/websites uploaded yet!";

/// Handler errors, rendered as `{"error": message}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyCorpus => ApiError::Conflict(NO_DOCUMENTS.into()),
            SearchError::InvalidSettings(msg) => ApiError::BadRequest(msg),
        }
    }
}
