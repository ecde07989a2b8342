//! Checkout submission.
//!
//! The client sends its cart, the customer form, and a payment method in
//! one request. Validation runs before any network or database call:
//! an empty cart or missing form fields never reach a payment provider.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mealkit_core::{Cart, CartItem, CustomerInfo, PaymentMethod};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::Order;
use crate::state::AppState;

/// Where the client is sent after a completed dummy payment.
const CONFIRMATION_PATH: &str = "/confirmation";

/// Create the checkout routes router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/order", post(submit))
}

/// Request body for checkout submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,
}

/// Response for a checkout submission.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckoutResponse {
    /// Klarna accepted the order; the client renders the snippet or
    /// follows the redirect.
    PaymentPending {
        html_snippet: Option<String>,
        redirect_url: Option<String>,
    },
    /// The order was recorded immediately (dummy payment).
    OrderCreated { order: Order, redirect: String },
}

/// POST /checkout/order - validate and dispatch to the payment method.
async fn submit(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let cart = Cart::from_items(request.items);
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }
    request.customer.validate()?;

    match request.payment_method {
        PaymentMethod::Klarna => {
            let klarna_order = state
                .klarna()
                .create_order(&cart, &request.customer)
                .await?;

            tracing::info!(
                klarna_order_id = klarna_order.order_id.as_deref().unwrap_or("unknown"),
                "Klarna checkout session created"
            );

            Ok((
                StatusCode::OK,
                Json(CheckoutResponse::PaymentPending {
                    html_snippet: klarna_order.html_snippet,
                    redirect_url: klarna_order.redirect_url,
                }),
            ))
        }
        PaymentMethod::Paypal => Err(AppError::PaymentUnsupported("paypal".to_string())),
        PaymentMethod::Dummy => {
            // Test payments are tied to an account so they stay traceable.
            let user = user.ok_or_else(|| {
                AppError::Unauthorized("dummy payment requires a logged-in user".to_string())
            })?;

            let order = OrderRepository::new(state.pool())
                .create(Some(user.id), &cart, &request.customer, PaymentMethod::Dummy)
                .await?;

            tracing::info!(
                order_id = %order.id,
                order_number = %order.order_number,
                user = %user.email,
                "Order placed with dummy payment"
            );

            Ok((
                StatusCode::CREATED,
                Json(CheckoutResponse::OrderCreated {
                    order,
                    redirect: CONFIRMATION_PATH.to_string(),
                }),
            ))
        }
    }
}
