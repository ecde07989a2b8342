//! Bearer-token authentication extractors.
//!
//! Provides extractors for requiring (or optionally reading) an
//! authenticated user in route handlers. Tokens are opaque strings issued
//! at login; the extractor hashes the presented token and looks it up.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use mealkit_core::{Email, UserId};

use crate::error::AppError;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// The authenticated caller, as seen by route handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Email,
    pub is_admin: bool,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// Extractor that requires an authenticated user.
///
/// Rejects with 401 if no valid bearer token is presented.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_bearer(parts, state)
            .await?
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))?;

        Ok(Self(user))
    }
}

/// Extractor that optionally reads the authenticated user.
///
/// Unlike [`RequireAuth`], a missing or unknown token yields `None`
/// instead of a rejection. Checkout uses this to attach orders to an
/// account when one is present while still serving guests.
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_bearer(parts, state).await?))
    }
}

/// Extractor that requires an authenticated admin.
///
/// Rejects with 401 for anonymous callers and 403 for authenticated
/// non-admins.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(AppError::Forbidden(
                "admin privileges required".to_string(),
            ));
        }

        Ok(Self(user))
    }
}

/// Look up the caller from the `Authorization: Bearer` header, if any.
///
/// An absent header is `None`; a present but unknown token is also `None`
/// so that the extractors decide how strict to be.
async fn resolve_bearer(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<AuthUser>, AppError> {
    let Some(token) = extract_bearer_token(parts) else {
        return Ok(None);
    };

    let user = AuthService::new(state.pool()).resolve_token(token).await?;
    Ok(user.map(AuthUser::from))
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn extract_bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut split = header.splitn(2, ' ');
    let scheme = split.next()?;
    let token = split.next()?.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_extracts_bearer_token() {
        let parts = parts_with_auth("Bearer abc123");
        assert_eq!(extract_bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let parts = parts_with_auth("bearer abc123");
        assert_eq!(extract_bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_rejects_other_schemes_and_empty_tokens() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&parts), None);

        let parts = parts_with_auth("Bearer ");
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn test_missing_header_yields_none() {
        let (parts, ()) = Request::builder().uri("/").body(()).unwrap().into_parts();
        assert_eq!(extract_bearer_token(&parts), None);
    }
}
