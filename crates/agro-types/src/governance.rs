//! DAO proposal types

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::text_enum! {
    /// `Active` until one side clears the threshold
    ProposalStatus, "proposal status" {
        Active => "active",
        Passed => "passed",
        Rejected => "rejected",
    }
}

crate::text_enum! {
    /// Direction of a single ballot
    Vote, "vote" {
        For => "for",
        Against => "against",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoProposal {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub votes_for: i64,
    pub votes_against: i64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    /// Informational only, voting is not closed at this time
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProposal {
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub ends_at: DateTime<Utc>,
}

impl DaoProposal {
    pub fn from_new(id: Id, new: NewProposal, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            votes_for: 0,
            votes_against: 0,
            status: ProposalStatus::Active,
            created_at,
            ends_at: new.ends_at,
        }
    }
}
