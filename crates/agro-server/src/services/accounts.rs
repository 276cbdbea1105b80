//! Account registration service

use agro_core::{AgroError, NewUser, Result, Storage, User};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::info;

pub struct Accounts {
    storage: Arc<dyn Storage>,
}

impl Accounts {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Register a user. The password is replaced by its Argon2 hash before
    /// it reaches storage.
    pub async fn register(&self, mut new_user: NewUser) -> Result<User> {
        info!("Registration attempt for: {}", new_user.username);

        // Check if user already exists
        if self
            .storage
            .get_user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AgroError::Conflict(format!(
                "username '{}' is already taken",
                new_user.username
            )));
        }

        new_user.password = hash_password(&new_user.password)?;
        let user = self.storage.create_user(new_user).await?;

        info!("Registered user {} ({})", user.id, user.user_type);
        Ok(user)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AgroError::PasswordHash(e.to_string()))
}
