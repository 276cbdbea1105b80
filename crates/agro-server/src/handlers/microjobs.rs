//! Microjob handlers

use super::user_filter;
use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, JsonBody, ValidatedJson};
use crate::AppState;
use agro_core::{Microjob, MicrojobStatus, NewMicrojob};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrojobQuery {
    user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MicrojobQuery>,
) -> Result<Json<Vec<Microjob>>, ApiError> {
    let jobs = match user_filter(query.user_id) {
        Some(user_id) => state.storage.list_microjobs_by_user(user_id).await,
        None => state.storage.list_microjobs().await,
    }
    .or_internal("Failed to get microjobs")?;

    Ok(Json(jobs))
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Microjob>, ApiError> {
    state
        .storage
        .get_microjob(id)
        .await
        .or_internal("Failed to get microjob")?
        .map(Json)
        .ok_or(ApiError::NotFound("Microjob"))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(job): ValidatedJson<NewMicrojob>,
) -> Result<(StatusCode, Json<Microjob>), ApiError> {
    let job = state
        .storage
        .create_microjob(job)
        .await
        .or_internal("Failed to create microjob")?;

    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_status(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: JsonBody,
) -> Result<Json<Microjob>, ApiError> {
    let status = body
        .str_field("status")
        .and_then(|s| s.parse::<MicrojobStatus>().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid status value".to_string()))?;

    state
        .storage
        .update_microjob_status(id, status)
        .await
        .or_internal("Failed to update microjob status")?
        .map(Json)
        .ok_or(ApiError::NotFound("Microjob"))
}
