//! Newsletter subscriber model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mealkit_core::{Email, SubscriberId};

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
