//! Marketplace listing types

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item offered for sale (seeds, tools, agri-waste, produce, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    /// Pricing unit such as `kg` or `piece`
    pub unit: String,
    pub quantity: f64,
    pub location: String,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketplaceItem {
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub unit: String,
    pub quantity: f64,
    pub location: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MarketplaceItem {
    /// New listings are always available.
    pub fn from_new(id: Id, new: NewMarketplaceItem, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            category: new.category,
            price: new.price,
            unit: new.unit,
            quantity: new.quantity,
            location: new.location,
            image_url: new.image_url,
            is_available: true,
            created_at,
        }
    }
}
