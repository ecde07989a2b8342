//! Order repository.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use mealkit_core::{Cart, CurrencyCode, CustomerInfo, OrderId, PaymentMethod, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderStatus};

/// Attempts at a fresh order number before giving up. The number space is
/// large, so a second collision in a row means something else is wrong.
const ORDER_NUMBER_ATTEMPTS: u32 = 3;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from a cart, snapshotting customer details and line
    /// items in one transaction.
    ///
    /// The total is recomputed from the cart lines; a client-supplied total
    /// is never accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back in that case. A collision on the random
    /// order number is retried with a fresh number.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        cart: &Cart,
        customer: &CustomerInfo,
        payment_method: PaymentMethod,
    ) -> Result<Order, RepositoryError> {
        let mut attempt = 1;
        loop {
            let order_number = generate_order_number();
            match self
                .try_create(&order_number, user_id, cart, customer, payment_method)
                .await
            {
                Err(err) if is_order_number_collision(&err) && attempt < ORDER_NUMBER_ATTEMPTS => {
                    tracing::warn!(%order_number, attempt, "Order number collision, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_create(
        &self,
        order_number: &str,
        user_id: Option<UserId>,
        cart: &Cart,
        customer: &CustomerInfo,
        payment_method: PaymentMethod,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders
                 (id, order_number, user_id, customer, status, payment_method, total, currency)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, order_number, user_id, customer, status, payment_method,
                       total, currency, created_at, updated_at",
        )
        .bind(OrderId::new())
        .bind(order_number)
        .bind(user_id)
        .bind(Json(customer.clone()))
        .bind(OrderStatus::Pending.as_str())
        .bind(payment_method.to_string())
        .bind(cart.total())
        .bind(CurrencyCode::default().code())
        .fetch_one(&mut *tx)
        .await?;

        for item in cart.items() {
            sqlx::query(
                "INSERT INTO order_items
                     (id, order_id, meal_id, name, image, unit_price, quantity, line_total)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.image)
            .bind(item.price.amount)
            .bind(i64::from(item.quantity))
            .bind(item.line_total())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// List orders, newest first, with the total count for pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);

        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, order_number, user_id, customer, status, payment_method,
                    total, currency, created_at, updated_at
             FROM orders
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(per_page))
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok((orders, total.0))
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_number, user_id, customer, status, payment_method,
                    total, currency, created_at, updated_at
             FROM orders
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Fetch the line items for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, meal_id, name, image, unit_price, quantity, line_total
             FROM order_items
             WHERE order_id = $1
             ORDER BY name",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Update an order's tracking status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders
             SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING id, order_number, user_id, customer, status, payment_method,
                       total, currency, created_at, updated_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }
}

/// Generate a human-readable order number.
fn generate_order_number() -> String {
    format!("MK-{:08}", rand::random::<u32>() % 100_000_000)
}

/// Whether the insert failed on the `order_number` uniqueness constraint.
fn is_order_number_collision(err: &RepositoryError) -> bool {
    matches!(
        err,
        RepositoryError::Database(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("orders_order_number_key")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::borrow::Cow;
    use std::error::Error;
    use std::fmt;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("MK-"));
        assert_eq!(number.len(), 11);
        assert!(number.get(3..).is_some_and(|s| s.chars().all(|c| c.is_ascii_digit())));
    }

    #[derive(Debug)]
    struct StubDbError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    fn db_error(code: &'static str, constraint: Option<&'static str>) -> RepositoryError {
        RepositoryError::Database(sqlx::Error::Database(Box::new(StubDbError {
            code,
            constraint,
        })))
    }

    #[test]
    fn test_order_number_collision_is_retryable() {
        let err = db_error("23505", Some("orders_order_number_key"));
        assert!(is_order_number_collision(&err));
    }

    #[test]
    fn test_other_unique_violations_are_not_retried() {
        let err = db_error("23505", Some("users_email_key"));
        assert!(!is_order_number_collision(&err));
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        assert!(!is_order_number_collision(&db_error("23503", None)));
        assert!(!is_order_number_collision(&RepositoryError::Conflict(
            "user exists".to_string()
        )));
    }
}
