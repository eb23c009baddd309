//! Catalog route handlers.
//!
//! Catalog reads are public; the frontend fetches the product list
//! before any login.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use sandbar_core::{CartError, Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List the full catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().products().await?))
}

/// Get one product by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .product(&id)
        .await?
        .ok_or(AppError::Cart(CartError::ProductNotFound(id)))?;
    Ok(Json(product))
}
