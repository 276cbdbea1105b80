//! User handlers

use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, ValidatedJson};
use crate::AppState;
use agro_core::{AgroError, NewUser, User};
use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new_user): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    match state.accounts.register(new_user).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(AgroError::Conflict(reason)) => {
            warn!("Registration rejected: {}", reason);
            Err(ApiError::Conflict("Username already exists".to_string()))
        }
        Err(source) => Err(ApiError::Internal {
            context: "Failed to create user",
            source,
        }),
    }
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<User>, ApiError> {
    state
        .storage
        .get_user(id)
        .await
        .or_internal("Failed to get user")?
        .map(Json)
        .ok_or(ApiError::NotFound("User"))
}
