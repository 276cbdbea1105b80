//! User types

use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::text_enum! {
    /// Kind of participant on the platform
    UserType, "user type" {
        Farmer => "farmer",
        Industry => "industry",
        Government => "government",
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    /// Argon2 hash; never leaves the server
    #[serde(skip_serializing, default)]
    pub password: String,
    pub full_name: String,
    pub user_type: UserType,
    pub location: String,
    pub wallet_address: Option<String>,
    pub bio: Option<String>,
    pub verified: bool,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User registration input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub user_type: UserType,
    pub location: String,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl User {
    /// Build a freshly registered user. Accounts start unverified.
    pub fn from_new(id: Id, new: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username: new.username,
            password: new.password,
            full_name: new.full_name,
            user_type: new.user_type,
            location: new.location,
            wallet_address: new.wallet_address,
            bio: new.bio,
            verified: false,
            profile_image: new.profile_image,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::from_new(
            1,
            NewUser {
                username: "farmer_john".to_string(),
                password: "$argon2id$secret".to_string(),
                full_name: "John Farmer".to_string(),
                user_type: UserType::Farmer,
                location: "Rural County".to_string(),
                wallet_address: None,
                bio: None,
                profile_image: None,
            },
            Utc::now(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], "John Farmer");
        assert_eq!(json["userType"], "farmer");
        assert_eq!(json["verified"], false);
    }
}
