//! Marketplace handlers

use super::{non_empty, user_filter};
use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, ValidatedJson};
use crate::AppState;
use agro_core::{MarketplaceItem, NewMarketplaceItem};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceQuery {
    category: Option<String>,
    user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MarketplaceQuery>,
) -> Result<Json<Vec<MarketplaceItem>>, ApiError> {
    let storage = &state.storage;
    let items = match (non_empty(query.category), user_filter(query.user_id)) {
        (Some(category), Some(user_id)) => storage
            .list_marketplace_items_by_category(&category)
            .await
            .map(|items| items.into_iter().filter(|i| i.user_id == user_id).collect()),
        (Some(category), None) => storage.list_marketplace_items_by_category(&category).await,
        (None, Some(user_id)) => storage.list_marketplace_items_by_user(user_id).await,
        (None, None) => storage.list_marketplace_items().await,
    }
    .or_internal("Failed to get marketplace items")?;

    Ok(Json(items))
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<MarketplaceItem>, ApiError> {
    state
        .storage
        .get_marketplace_item(id)
        .await
        .or_internal("Failed to get marketplace item")?
        .map(Json)
        .ok_or(ApiError::NotFound("Item"))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(item): ValidatedJson<NewMarketplaceItem>,
) -> Result<(StatusCode, Json<MarketplaceItem>), ApiError> {
    let item = state
        .storage
        .create_marketplace_item(item)
        .await
        .or_internal("Failed to create marketplace item")?;

    Ok((StatusCode::CREATED, Json(item)))
}
