//! Newsletter subscription routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mealkit_core::Email;

use crate::db::NewsletterRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Subscriber;
use crate::state::AppState;

/// Create the newsletter routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(subscribe).get(list))
        .route("/{email}", delete(unsubscribe))
}

/// Request body for subscribing.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Response for a subscription attempt.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub subscribed: bool,
}

/// POST /newsletter - subscribe an email address.
///
/// Subscribing an already-subscribed address succeeds; the response does
/// not reveal whether the address was known before.
async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = Email::parse(&request.email)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let created = NewsletterRepository::new(state.pool()).subscribe(&email).await?;
    if created {
        tracing::info!("Newsletter subscription added");
    } else {
        tracing::debug!("Newsletter subscription already present");
    }

    Ok(Json(SubscribeResponse { subscribed: true }))
}

/// GET /newsletter - all subscribers, newest first (admin).
async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Subscriber>>> {
    let subscribers = NewsletterRepository::new(state.pool()).list().await?;
    Ok(Json(subscribers))
}

/// DELETE /newsletter/{email} - remove a subscription (admin).
async fn unsubscribe(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode> {
    let email = Email::parse(&email)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let removed = NewsletterRepository::new(state.pool()).unsubscribe(&email).await?;
    if !removed {
        return Err(AppError::NotFound(format!("subscription for {email}")));
    }

    tracing::info!(admin = %admin.email, "Newsletter subscription removed");

    Ok(StatusCode::NO_CONTENT)
}
