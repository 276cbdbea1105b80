//! Simulated liquidity pool types (display only, no funds move)

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::text_enum! {
    RiskLevel, "risk" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPool {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// yield, lending, ...
    pub pool_type: String,
    pub total_liquidity: f64,
    pub asset: String,
    pub apy: f64,
    pub participants: i64,
    pub risk: RiskLevel,
    /// Lock-up period, e.g. "6 months"
    pub duration: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Id,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLiquidityPool {
    pub name: String,
    pub description: String,
    pub pool_type: String,
    pub total_liquidity: f64,
    pub asset: String,
    pub apy: f64,
    pub participants: i64,
    pub risk: RiskLevel,
    pub duration: String,
    pub user_id: Id,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl LiquidityPool {
    pub fn from_new(id: Id, new: NewLiquidityPool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            pool_type: new.pool_type,
            total_liquidity: new.total_liquidity,
            asset: new.asset,
            apy: new.apy,
            participants: new.participants,
            risk: new.risk,
            duration: new.duration,
            created_at,
            user_id: new.user_id,
            image_url: new.image_url,
        }
    }
}
