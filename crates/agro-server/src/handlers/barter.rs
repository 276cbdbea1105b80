//! Barter offer handlers

use super::user_filter;
use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, JsonBody, ValidatedJson};
use crate::AppState;
use agro_core::{BarterOffer, BarterStatus, NewBarterOffer};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarterQuery {
    user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BarterQuery>,
) -> Result<Json<Vec<BarterOffer>>, ApiError> {
    let offers = match user_filter(query.user_id) {
        Some(user_id) => state.storage.list_barter_offers_by_user(user_id).await,
        None => state.storage.list_barter_offers().await,
    }
    .or_internal("Failed to get barter offers")?;

    Ok(Json(offers))
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<BarterOffer>, ApiError> {
    state
        .storage
        .get_barter_offer(id)
        .await
        .or_internal("Failed to get barter offer")?
        .map(Json)
        .ok_or(ApiError::NotFound("Barter offer"))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(offer): ValidatedJson<NewBarterOffer>,
) -> Result<(StatusCode, Json<BarterOffer>), ApiError> {
    let offer = state
        .storage
        .create_barter_offer(offer)
        .await
        .or_internal("Failed to create barter offer")?;

    info!(
        "Barter offer {} created: user {} -> user {}",
        offer.id, offer.offer_user_id, offer.receive_user_id
    );
    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn update_status(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: JsonBody,
) -> Result<Json<BarterOffer>, ApiError> {
    let status = body
        .str_field("status")
        .and_then(|s| s.parse::<BarterStatus>().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid status value".to_string()))?;

    let offer = state
        .storage
        .update_barter_offer_status(id, status)
        .await
        .or_internal("Failed to update barter offer status")?
        .ok_or(ApiError::NotFound("Barter offer"))?;

    info!("Barter offer {} is now {}", offer.id, offer.status);
    Ok(Json(offer))
}
