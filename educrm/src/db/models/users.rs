//! Database models for admin users.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for creating an admin user.
///
/// `hashed_password` is an argon2 PHC string; hashing happens in the auth
/// layer, never here.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    pub hashed_password: String,
    pub role: String,
}

/// Database response for an admin user
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub username: String,
    pub hashed_password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
