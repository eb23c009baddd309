//! Authentication extractor.
//!
//! Cart and checkout routes require a bearer token that resolves to a
//! user record. Token issuance is handled outside this service; the
//! extractor only checks that the presented token belongs to a known
//! user.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use sandbar_core::User;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Reads `Authorization: Bearer <token>` and resolves the token against
/// the user store. Rejects with 401 when the header is missing,
/// malformed, or unknown.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .users()
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(user))
    }
}
