//! Request extractors that reject with JSON `ApiError` bodies

use crate::error::ApiError;
use agro_core::validation::{self, Validate};
use agro_core::Id;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;

/// Numeric `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        raw.parse::<Id>()
            .map(EntityId)
            .map_err(|_| ApiError::BadRequest(format!("Invalid id '{}'", raw)))
    }
}

/// Any well-formed JSON body
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl JsonBody {
    /// String value of a top-level field
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// JSON body checked against the input type's field table
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::from_request(req, state).await?;
        validation::parse::<T>(value)
            .map(ValidatedJson)
            .map_err(ApiError::Validation)
    }
}
