//! Order routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;

use mealkit_core::{Cart, CartItem, CustomerInfo, OrderId, PaymentMethod};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{Order, OrderStatus, OrderWithItems, PaginatedResponse};
use crate::state::AppState;

const DEFAULT_PER_PAGE: u32 = 25;
const MAX_PER_PAGE: u32 = 100;

/// Create the order routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail))
        .route("/{id}/status", patch(update_status))
}

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Request body for placing an order directly, without a payment session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<CartItem>,
    pub customer: CustomerInfo,
}

/// Request body for updating an order's tracking status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// POST /orders - place an order for the authenticated user.
///
/// Shares semantics with the dummy-payment checkout branch: the cart is
/// validated and the total recomputed server-side.
async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let cart = Cart::from_items(request.items);
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }
    request.customer.validate()?;

    let order = OrderRepository::new(state.pool())
        .create(Some(user.id), &cart, &request.customer, PaymentMethod::Dummy)
        .await?;

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        user = %user.email,
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders - paginated listing, newest first (admin).
async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<Order>>> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let (orders, total) = OrderRepository::new(state.pool()).list(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        data: orders,
        total,
        page,
    }))
}

/// GET /orders/{id} - order with line items, for the owner or an admin.
async fn detail(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !user.is_admin && order.user_id != Some(user.id) {
        return Err(AppError::Forbidden(
            "order belongs to another account".to_string(),
        ));
    }

    let items = repo.items(id).await?;
    Ok(Json(OrderWithItems { order, items }))
}

/// PATCH /orders/{id}/status - update tracking status (admin).
async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, request.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    tracing::info!(
        order_id = %id,
        status = %request.status,
        admin = %admin.email,
        "Order status updated"
    );

    Ok(Json(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_request_rejects_unknown_status() {
        let ok: UpdateStatusRequest =
            serde_json::from_str(r#"{"status": "shipped"}"#).unwrap();
        assert_eq!(ok.status, OrderStatus::Shipped);

        assert!(serde_json::from_str::<UpdateStatusRequest>(r#"{"status": "lost"}"#).is_err());
    }
}
