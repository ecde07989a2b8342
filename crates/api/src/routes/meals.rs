//! Meal catalog routes.
//!
//! The public listing is served from a short-lived cache; every admin
//! mutation drops the cache so storefront clients never see a stale
//! catalog for longer than one TTL.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use mealkit_core::MealId;

use crate::db::meals::{MealInput, MealRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::MealResponse;
use crate::state::{AppState, MEALS_CACHE_KEY};

/// Create the meal routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).put(update).delete(remove))
}

/// Request body for creating or updating a meal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
}

impl MealPayload {
    fn into_input(self) -> Result<MealInput> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::BadRequest("price must be positive".to_string()));
        }

        Ok(MealInput {
            name: self.name,
            description: self.description,
            image: self.image,
            price: self.price,
        })
    }
}

/// GET /meals - list active meals, served from cache when warm.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<MealResponse>>> {
    let meals = match state.meal_cache().get(MEALS_CACHE_KEY).await {
        Some(meals) => meals,
        None => {
            let fresh = Arc::new(MealRepository::new(state.pool()).list_active().await?);
            state.meal_cache().insert(MEALS_CACHE_KEY, fresh.clone()).await;
            fresh
        }
    };

    let img_base_url = &state.config().img_base_url;
    let response = meals
        .iter()
        .map(|meal| MealResponse::from_meal(meal, img_base_url))
        .collect();

    Ok(Json(response))
}

/// GET /meals/{id} - meal detail. Inactive meals are hidden.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<MealId>,
) -> Result<Json<MealResponse>> {
    let meal = MealRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|meal| meal.active)
        .ok_or_else(|| AppError::NotFound(format!("meal {id}")))?;

    Ok(Json(MealResponse::from_meal(
        &meal,
        &state.config().img_base_url,
    )))
}

/// POST /meals - create a meal (admin).
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<MealPayload>,
) -> Result<(StatusCode, Json<MealResponse>)> {
    let input = payload.into_input()?;
    let meal = MealRepository::new(state.pool()).create(&input).await?;
    state.invalidate_meal_cache().await;

    tracing::info!(meal_id = %meal.id, admin = %admin.email, "Meal created");

    Ok((
        StatusCode::CREATED,
        Json(MealResponse::from_meal(&meal, &state.config().img_base_url)),
    ))
}

/// PUT /meals/{id} - update a meal (admin).
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MealId>,
    Json(payload): Json<MealPayload>,
) -> Result<Json<MealResponse>> {
    let input = payload.into_input()?;
    let meal = MealRepository::new(state.pool())
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("meal {id}")))?;
    state.invalidate_meal_cache().await;

    tracing::info!(meal_id = %id, admin = %admin.email, "Meal updated");

    Ok(Json(MealResponse::from_meal(
        &meal,
        &state.config().img_base_url,
    )))
}

/// DELETE /meals/{id} - deactivate a meal (admin).
///
/// Soft delete: existing orders keep their snapshots.
async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MealId>,
) -> Result<StatusCode> {
    let removed = MealRepository::new(state.pool()).deactivate(id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("meal {id}")));
    }
    state.invalidate_meal_cache().await;

    tracing::info!(meal_id = %id, admin = %admin.email, "Meal deactivated");

    Ok(StatusCode::NO_CONTENT)
}
