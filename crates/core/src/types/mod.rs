//! Newtype wrappers for type-safe IDs, prices, and emails.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use id::{MealId, OrderId, SubscriberId, UserId};
pub use price::{CurrencyCode, Price};
