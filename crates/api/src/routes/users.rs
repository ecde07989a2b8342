//! Account routes: registration, login, and profile management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mealkit_core::CustomerInfo;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Create the user routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_profile))
}

/// Request body for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The bearer token. Shown once; only its hash is stored.
    pub token: String,
    pub user: UserResponse,
}

/// POST /users - register a new account.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&request.email, &request.password, false)
        .await?;

    tracing::info!(user_id = %user.id, "Account registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /users/login - verify credentials and issue a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, token) = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /users/me - the authenticated account.
async fn me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", auth.id)))?;

    Ok(Json(user.into()))
}

/// PUT /users/me - replace the stored checkout profile.
///
/// The profile pre-fills the checkout form; it is stored as-is and only
/// validated when an order is actually submitted.
async fn update_profile(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(profile): Json<CustomerInfo>,
) -> Result<Json<UserResponse>> {
    let user = UserRepository::new(state.pool())
        .update_profile(auth.id, &profile)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", auth.id)))?;

    tracing::debug!(user_id = %auth.id, "Profile updated");

    Ok(Json(user.into()))
}
