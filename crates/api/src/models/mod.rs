//! Database row models and response DTOs.

pub mod meal;
pub mod newsletter;
pub mod order;
pub mod user;

pub use meal::{Meal, MealResponse};
pub use newsletter::Subscriber;
pub use order::{Order, OrderItem, OrderStatus, OrderWithItems};
pub use user::{User, UserResponse};

use serde::Serialize;

/// A page of results plus the total row count.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
}
