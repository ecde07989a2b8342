//! Admin panel data surface.
//!
//! The admin UI is a single page with mutually exclusive tabs. The
//! overview endpoint returns data for exactly one tab per request; the
//! tab enum makes "two panels open at once" unrepresentable.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::{MealRepository, NewsletterRepository, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{Meal, Order, Subscriber};
use crate::state::AppState;

/// Orders shown on the tracking tab; older ones are reached through the
/// paginated orders endpoint.
const TRACKING_PAGE_SIZE: u32 = 50;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/overview", get(overview))
}

/// The admin panel tabs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminTab {
    #[default]
    MealPackages,
    OrderTracking,
    Newsletter,
}

/// Query parameters for the overview endpoint.
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    #[serde(default)]
    pub tab: AdminTab,
}

/// Data for the active tab. Serializes with a `tab` discriminator and
/// only that tab's panel.
#[derive(Debug, Serialize)]
#[serde(tag = "tab", rename_all = "camelCase")]
pub enum AdminOverview {
    MealPackages { meals: Vec<Meal> },
    OrderTracking { orders: Vec<Order>, total: i64 },
    Newsletter { subscribers: Vec<Subscriber> },
}

/// GET /admin/overview?tab= - data for one admin tab (admin).
async fn overview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<AdminOverview>> {
    let overview = match params.tab {
        AdminTab::MealPackages => {
            // Admins see inactive meals too, so no cache here.
            let meals = MealRepository::new(state.pool()).list_all().await?;
            AdminOverview::MealPackages { meals }
        }
        AdminTab::OrderTracking => {
            let (orders, total) = OrderRepository::new(state.pool())
                .list(1, TRACKING_PAGE_SIZE)
                .await?;
            AdminOverview::OrderTracking { orders, total }
        }
        AdminTab::Newsletter => {
            let subscribers = NewsletterRepository::new(state.pool()).list().await?;
            AdminOverview::Newsletter { subscribers }
        }
    };

    Ok(Json(overview))
}
