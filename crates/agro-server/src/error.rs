//! HTTP error responses

use agro_core::validation::Issue;
use agro_core::AgroError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every way a request can fail, mapped onto a status code
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(Vec<Issue>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Details are logged, never returned to the caller
    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: AgroError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            ApiError::Validation(details) => json!({
                "message": "Validation error",
                "details": details,
            }),
            ApiError::Internal { context, source } => {
                tracing::error!("{}: {}", context, source);
                json!({ "message": context })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Attach the caller-facing message to a storage failure
pub trait OrInternal<T> {
    fn or_internal(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> OrInternal<T> for agro_core::Result<T> {
    fn or_internal(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Internal { context, source })
    }
}
