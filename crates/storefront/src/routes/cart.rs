//! Cart and checkout route handlers.
//!
//! The cart endpoints are a thin layer over the core reconciler and
//! totalizer: resolve the user, run the pure operation, persist the
//! result. Checkout sequences the debit and the payment-session call as
//! reserve-then-commit: the balance is debited before the provider call
//! and credited back if session creation fails, so a failed payment
//! never costs the user anything.

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sandbar_core::{AddressId, CartLine, Product, ProductId, reconcile, totalize};

use crate::error::{AppError, Result};
use crate::middleware::{AppJson, CurrentUser};
use crate::state::AppState;

/// Cart mutation request body.
#[derive(Debug, Deserialize)]
pub struct CartMutation {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Absolute quantity to set; 0 removes the line. Parsed wide so a
    /// negative value is rejected by the reconciler, not by serde.
    pub qty: i64,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "addressId")]
    pub address_id: Option<AddressId>,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    /// Hosted payment page to redirect the client to.
    pub url: String,
}

/// Get the authenticated user's cart.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn show(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user.cart)
}

/// Apply a cart mutation and persist the resulting cart.
///
/// Upsert/delete semantics: a positive `qty` sets the line absolutely
/// (appending it if new), `qty == 0` removes it.
#[instrument(skip(state, user), fields(user = %user.username))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    AppJson(mutation): AppJson<CartMutation>,
) -> Result<Json<Vec<CartLine>>> {
    let exists = state.catalog().product(&mutation.product_id).await?.is_some();

    let next = reconcile(&user.cart, |_| exists, &mutation.product_id, mutation.qty)?;

    user.cart = next;
    state.users().save(&user).await?;
    tracing::info!(lines = user.cart.len(), "cart updated");

    Ok(Json(user.cart))
}

/// Price the cart, reserve funds, and create a payment session.
#[instrument(skip(state, user), fields(user = %user.username))]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    AppJson(request): AppJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    // Re-resolve every line against the live catalog; client-side prices
    // are never consulted.
    let mut resolved: Vec<(ProductId, Option<Product>)> = Vec::with_capacity(user.cart.len());
    for line in &user.cart {
        let product = state.catalog().product(&line.product_id).await?;
        resolved.push((line.product_id.clone(), product));
    }
    let lookup = |id: &ProductId| {
        resolved
            .iter()
            .find(|(pid, _)| pid == id)
            .and_then(|(_, p)| p.clone())
    };

    let order = totalize(&user, lookup, request.address_id.as_ref())?;

    // Reserve: debit and persist before talking to the provider.
    user.debit(order.total)?;
    state.users().save(&user).await?;

    match state.payments().create_session(&order).await {
        Ok(url) => {
            tracing::info!(total = %order.total, "order placed");
            Ok(Json(CheckoutResponse { success: true, url }))
        }
        Err(payment_err) => {
            // Compensate: release the reserved funds before surfacing the
            // provider failure. The cart itself was never touched.
            user.credit(order.total);
            if let Err(save_err) = state.users().save(&user).await {
                tracing::error!(
                    error = %save_err,
                    "failed to release reserved funds after payment failure"
                );
                return Err(AppError::Store(save_err));
            }
            Err(AppError::Payment(payment_err))
        }
    }
}

/// Order confirmation: clear the cart.
///
/// Idempotent; confirming an already-empty cart is a no-op with the same
/// observable result.
#[instrument(skip(state, user), fields(user = %user.username))]
pub async fn confirm(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
) -> Result<Json<serde_json::Value>> {
    user.clear_cart();
    state.users().save(&user).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
