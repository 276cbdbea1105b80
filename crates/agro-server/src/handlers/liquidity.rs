//! Liquidity pool handlers

use super::non_empty;
use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, ValidatedJson};
use crate::AppState;
use agro_core::{LiquidityPool, NewLiquidityPool, RiskLevel};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PoolQuery {
    risk: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PoolQuery>,
) -> Result<Json<Vec<LiquidityPool>>, ApiError> {
    let risk = match non_empty(query.risk) {
        None => None,
        Some(raw) => match raw.parse::<RiskLevel>() {
            Ok(level) => Some(level),
            // No pool can carry an unknown risk level
            Err(_) => return Ok(Json(Vec::new())),
        },
    };

    let pools = state
        .storage
        .list_liquidity_pools(risk)
        .await
        .or_internal("Failed to get liquidity pools")?;

    Ok(Json(pools))
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<LiquidityPool>, ApiError> {
    state
        .storage
        .get_liquidity_pool(id)
        .await
        .or_internal("Failed to get liquidity pool")?
        .map(Json)
        .ok_or(ApiError::NotFound("Liquidity pool"))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(pool): ValidatedJson<NewLiquidityPool>,
) -> Result<(StatusCode, Json<LiquidityPool>), ApiError> {
    let pool = state
        .storage
        .create_liquidity_pool(pool)
        .await
        .or_internal("Failed to create liquidity pool")?;

    Ok((StatusCode::CREATED, Json(pool)))
}
