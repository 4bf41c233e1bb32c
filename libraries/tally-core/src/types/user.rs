/// User domain types
use super::ids::UserId;
use crate::error::{Result, TallyError};
use serde::{Deserialize, Serialize};

/// User account
///
/// The password hash deliberately lives outside this type so an account can
/// be serialized into API responses without ever carrying credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique across all accounts
    pub username: String,

    /// Account creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Data for creating a new user account
///
/// `password_hash` must already be hashed; plaintext never reaches storage.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}

impl CreateUser {
    /// Validate required fields before persistence
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(TallyError::invalid_input("username is required"));
        }
        if self.password_hash.is_empty() {
            return Err(TallyError::invalid_input("password hash is required"));
        }
        Ok(())
    }
}
