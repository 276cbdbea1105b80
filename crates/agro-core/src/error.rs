//! Error types for AgroChain

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgroError>;

/// Failures raised by storage backends and core services.
///
/// A missing entity is not an error: lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum AgroError {
    #[error("Database error: {0}")]
    Database(String),

    /// A uniqueness constraint rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<agro_types::ParseEnumError> for AgroError {
    fn from(e: agro_types::ParseEnumError) -> Self {
        AgroError::InvalidValue(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_types::RiskLevel;

    #[test]
    fn test_unreadable_enum_is_invalid_value() {
        let err: AgroError = "extreme".parse::<RiskLevel>().unwrap_err().into();
        assert!(matches!(err, AgroError::InvalidValue(_)));
        assert!(err.to_string().contains("extreme"));
    }
}
