//! Catalog and user domain types.
//!
//! Field renames match the wire format the frontend already speaks:
//! records carry `_id`, cart lines carry `productId`/`qty`. The same
//! serde shapes are used for the JSON document store, so a store file is
//! readable as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::types::{AddressId, Money, ProductId, UserId};

/// A catalog product.
///
/// Immutable from the cart/checkout path's perspective; owned by the
/// catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (e.g. "Fashion", "Electronics").
    pub category: String,
    /// Unit price in minor currency units.
    pub cost: Money,
    /// Star rating, 0-5.
    pub rating: u8,
    /// Product image URL.
    #[serde(rename = "image")]
    pub image_url: String,
}

/// One product-quantity pair within a user's cart.
///
/// A product appears at most once per cart; the reconciler enforces that,
/// not the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Quantity, always positive for a persisted line.
    pub qty: u32,
}

/// A shipping address owned by a user.
///
/// Address CRUD is outside this core; checkout only needs an existence
/// check by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Unique address ID.
    #[serde(rename = "_id")]
    pub id: AddressId,
    /// Free-form street address text.
    #[serde(rename = "address")]
    pub street: String,
}

/// A storefront user.
///
/// Cart and balance are mutated only through the reconcile and checkout
/// operations; everything else about the user is managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Wallet balance in minor currency units.
    pub balance: Money,
    /// Current cart contents, in append order.
    #[serde(default)]
    pub cart: Vec<CartLine>,
    /// Shipping addresses.
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Opaque bearer token for API access. Persisted in the server-side
    /// store only; no route ever serializes a `User` to a client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// When the user record was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user owns an address with the given id.
    #[must_use]
    pub fn has_address(&self, address_id: &AddressId) -> bool {
        self.addresses.iter().any(|a| a.id == *address_id)
    }

    /// Debit the wallet balance by `amount`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InsufficientBalance` if the balance would
    /// go negative.
    pub fn debit(&mut self, amount: Money) -> Result<(), CheckoutError> {
        if self.balance < amount {
            return Err(CheckoutError::InsufficientBalance {
                balance: self.balance,
                total: amount,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(CheckoutError::TotalOverflow)?;
        Ok(())
    }

    /// Credit the wallet balance by `amount` (compensation path after a
    /// failed payment-session creation).
    pub fn credit(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Empty the cart. Idempotent.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}
