//! Newsletter subscriber repository.

use sqlx::PgPool;

use mealkit_core::{Email, SubscriberId};

use super::RepositoryError;
use crate::models::Subscriber;

/// Repository for newsletter subscription operations.
pub struct NewsletterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsletterRepository<'a> {
    /// Create a new newsletter repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address.
    ///
    /// Returns `true` if a new subscription was created and `false` if the
    /// address was already subscribed. Resubscribing is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn subscribe(&self, email: &Email) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO newsletter_subscribers (id, email)
             VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(SubscriberId::new())
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all subscribers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            "SELECT id, email, created_at
             FROM newsletter_subscribers
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }

    /// Remove a subscription.
    ///
    /// Returns `true` if the address was subscribed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn unsubscribe(&self, email: &Email) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE email = $1")
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
