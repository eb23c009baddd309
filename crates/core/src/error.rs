//! Error taxonomies for the cart and checkout operations.
//!
//! Every failure is a distinct variant so the HTTP boundary can map each
//! kind to its own status and message; nothing is collapsed into a
//! generic failure and nothing is retried here.

use thiserror::Error;

use crate::types::{AddressId, Money, ProductId};

/// Failures of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The referenced product does not exist in the catalog.
    #[error("product {0} doesn't exist")]
    ProductNotFound(ProductId),

    /// The requested quantity was negative or out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),
}

/// Failures of the checkout totalizer.
///
/// Variants are listed in validation order; the first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A cart line references a product the catalog can no longer resolve.
    #[error("invalid product in cart: {0}")]
    InvalidCartItem(ProductId),

    /// The cart totals to zero.
    #[error("cart is empty")]
    EmptyCart,

    /// The wallet balance does not cover the order total.
    #[error("wallet balance not sufficient to place order ({balance} < {total})")]
    InsufficientBalance {
        /// Current wallet balance.
        balance: Money,
        /// Computed order total.
        total: Money,
    },

    /// No shipping address id was supplied.
    #[error("address not set")]
    MissingAddress,

    /// The supplied address id is not one of the user's addresses.
    #[error("bad address specified: {0}")]
    AddressNotFound(AddressId),

    /// Integer overflow while summing the order. Only reachable with a
    /// corrupt catalog; surfaced rather than wrapped silently.
    #[error("order total overflows")]
    TotalOverflow,
}
