//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that maps every domain error kind to
//! its own HTTP status and a structured `{"success": false, "message"}`
//! JSON body, capturing server-side failures to Sentry before responding.
//! All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use sandbar_core::{CartError, CheckoutError, StoreError};

use crate::services::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout validation failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The backing store failed; the operation's effect is unknown.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Payment provider call failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Malformed request body rejected by the JSON extractor.
    #[error("{0}")]
    JsonRejection(#[from] JsonRejection),

    /// Missing or unknown bearer token.
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    /// HTTP status for this error kind.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Cart(CartError::ProductNotFound(_))
            | Self::Checkout(CheckoutError::AddressNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::InvalidQuantity(_))
            | Self::Checkout(
                CheckoutError::InvalidCartItem(_)
                | CheckoutError::EmptyCart
                | CheckoutError::InsufficientBalance { .. }
                | CheckoutError::MissingAddress,
            )
            | Self::JsonRejection(_) => StatusCode::BAD_REQUEST,
            Self::Checkout(CheckoutError::TotalOverflow) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry
        if matches!(
            self,
            Self::Store(_) | Self::Payment(_) | Self::Checkout(CheckoutError::TotalOverflow)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) | Self::Checkout(CheckoutError::TotalOverflow) => {
                "Internal server error".to_string()
            }
            Self::Payment(_) => "Payment provider error".to_string(),
            Self::Unauthorized => "Protected route, Oauth2 Bearer token not found".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use sandbar_core::{AddressId, Money, ProductId};

    use super::*;

    #[test]
    fn test_status_codes_per_error_kind() {
        fn get_status(err: AppError) -> StatusCode {
            err.status()
        }

        assert_eq!(
            get_status(AppError::Cart(CartError::ProductNotFound(ProductId::new(
                "p1"
            )))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::InvalidQuantity(-3))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::InsufficientBalance {
                balance: Money::from_minor(100),
                total: Money::from_minor(450),
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::MissingAddress)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::AddressNotFound(
                AddressId::new("a1")
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::InvalidCartItem(
                ProductId::new("p1")
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Store(StoreError::persistence("disk gone"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_messages_are_client_visible() {
        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "cart is empty");

        // Store details never reach the client body.
        let response = AppError::Store(StoreError::persistence("users.json: permission denied"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
