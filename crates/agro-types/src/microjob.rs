//! Microjob board types

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::text_enum! {
    MicrojobStatus, "microjob status" {
        Open => "open",
        Assigned => "assigned",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microjob {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub skills_required: String,
    pub compensation: f64,
    pub location: String,
    pub duration: String,
    pub status: MicrojobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMicrojob {
    pub user_id: Id,
    pub title: String,
    pub description: String,
    pub skills_required: String,
    pub compensation: f64,
    pub location: String,
    pub duration: String,
}

impl Microjob {
    pub fn from_new(id: Id, new: NewMicrojob, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            skills_required: new.skills_required,
            compensation: new.compensation,
            location: new.location,
            duration: new.duration,
            status: MicrojobStatus::Open,
            created_at,
        }
    }
}
