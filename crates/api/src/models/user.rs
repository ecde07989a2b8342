//! User account models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;

use mealkit_core::{CustomerInfo, Email, UserId};

/// A user account as stored in the database.
///
/// The optional profile pre-fills the checkout form; it is never required
/// to place an order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: String,
    pub is_admin: bool,
    pub profile: Option<Json<CustomerInfo>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: Email,
    pub is_admin: bool,
    pub profile: Option<CustomerInfo>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
            profile: user.profile.map(|p| p.0),
            created_at: user.created_at,
        }
    }
}
