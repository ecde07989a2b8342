//! Meal catalog repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use mealkit_core::MealId;

use super::RepositoryError;
use crate::models::Meal;

/// Fields accepted when creating or updating a meal.
#[derive(Debug, Clone)]
pub struct MealInput {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
}

/// Repository for meal database operations.
pub struct MealRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MealRepository<'a> {
    /// Create a new meal repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all active meals, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Meal>, RepositoryError> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT id, name, description, image, price, active, created_at, updated_at
             FROM meals
             WHERE active
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(meals)
    }

    /// List every meal, active or not, newest first. Used by the admin
    /// panel, which can reactivate meals the storefront no longer shows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Meal>, RepositoryError> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT id, name, description, image, price, active, created_at, updated_at
             FROM meals
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(meals)
    }

    /// Get a meal by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MealId) -> Result<Option<Meal>, RepositoryError> {
        let meal = sqlx::query_as::<_, Meal>(
            "SELECT id, name, description, image, price, active, created_at, updated_at
             FROM meals
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(meal)
    }

    /// Insert a new meal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &MealInput) -> Result<Meal, RepositoryError> {
        let meal = sqlx::query_as::<_, Meal>(
            "INSERT INTO meals (id, name, description, image, price, active)
             VALUES ($1, $2, $3, $4, $5, TRUE)
             RETURNING id, name, description, image, price, active, created_at, updated_at",
        )
        .bind(MealId::new())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .fetch_one(self.pool)
        .await?;

        Ok(meal)
    }

    /// Update an existing meal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: MealId,
        input: &MealInput,
    ) -> Result<Option<Meal>, RepositoryError> {
        let meal = sqlx::query_as::<_, Meal>(
            "UPDATE meals
             SET name = $2, description = $3, image = $4, price = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING id, name, description, image, price, active, created_at, updated_at",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .fetch_optional(self.pool)
        .await?;

        Ok(meal)
    }

    /// Soft-delete a meal by marking it inactive.
    ///
    /// Orders keep their snapshots, so nothing is ever physically removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn deactivate(&self, id: MealId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE meals SET active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
