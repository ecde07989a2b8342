//! HTTP route handlers for the Mealkit API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Meals
//! GET    /meals                 - Active meal listing (cached)
//! GET    /meals/{id}            - Meal detail
//! POST   /meals                 - Create meal (admin)
//! PUT    /meals/{id}            - Update meal (admin)
//! DELETE /meals/{id}            - Deactivate meal (admin)
//!
//! # Checkout
//! POST /checkout/order          - Submit cart + customer + payment method
//!
//! # Orders
//! POST  /orders                 - Place an order directly (requires auth)
//! GET   /orders                 - Paginated order listing (admin)
//! GET   /orders/{id}            - Order detail (owner or admin)
//! PATCH /orders/{id}/status     - Update tracking status (admin)
//!
//! # Users
//! POST /users                   - Register
//! POST /users/login             - Login, returns a bearer token
//! GET  /users/me                - Current account (requires auth)
//! PUT  /users/me                - Update checkout profile (requires auth)
//!
//! # Newsletter
//! POST   /newsletter            - Subscribe an email
//! GET    /newsletter            - Subscriber listing (admin)
//! DELETE /newsletter/{email}    - Remove a subscription (admin)
//!
//! # Admin
//! GET /admin/overview           - Tabbed admin panel data (admin)
//! ```

pub mod admin;
pub mod checkout;
pub mod meals;
pub mod newsletter;
pub mod orders;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Assemble all resource routers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/meals", meals::routes())
        .nest("/checkout", checkout::routes())
        .nest("/orders", orders::routes())
        .nest("/users", users::routes())
        .nest("/newsletter", newsletter::routes())
        .nest("/admin", admin::routes())
}
