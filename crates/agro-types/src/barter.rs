//! Barter exchange types

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::text_enum! {
    /// Lifecycle of a barter offer
    BarterStatus, "barter status" {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
}

/// A proposed one-for-one exchange of two marketplace items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarterOffer {
    pub id: Id,
    pub offer_user_id: Id,
    pub receive_user_id: Id,
    pub offer_item_id: Id,
    pub request_item_id: Id,
    pub status: BarterStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBarterOffer {
    pub offer_user_id: Id,
    pub receive_user_id: Id,
    pub offer_item_id: Id,
    pub request_item_id: Id,
}

impl BarterOffer {
    pub fn from_new(id: Id, new: NewBarterOffer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            offer_user_id: new.offer_user_id,
            receive_user_id: new.receive_user_id,
            offer_item_id: new.offer_item_id,
            request_item_id: new.request_item_id,
            status: BarterStatus::Pending,
            created_at,
        }
    }

    /// Whether the user sits on either side of the exchange
    pub fn involves(&self, user_id: Id) -> bool {
        self.offer_user_id == user_id || self.receive_user_id == user_id
    }
}
