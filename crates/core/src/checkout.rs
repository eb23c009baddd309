//! Checkout totalization and precondition checks.
//!
//! [`totalize`] re-prices every cart line against the live catalog
//! (client-supplied prices are never trusted), validates the checkout
//! preconditions in a fixed order, and produces the priced line-item
//! list handed to the payment-session creator. It is pure: the balance
//! debit, persistence, and the payment call are the caller's to sequence.

use serde::Serialize;

use crate::error::CheckoutError;
use crate::models::{Product, User};
use crate::types::{AddressId, Money, ProductId};

/// One priced line of an order, in cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Product display name at checkout time.
    pub name: String,
    /// Unit price in minor currency units, read from the catalog.
    pub unit_cost: Money,
    /// Quantity from the cart line.
    pub qty: u32,
}

/// The priced order a successful totalization produces.
///
/// Transient value: consumed by the payment-session creator, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    /// Priced lines in cart order.
    pub line_items: Vec<LineItem>,
    /// Sum of `qty x unit_cost` over all lines.
    pub total: Money,
}

/// Price the user's cart and validate the checkout preconditions.
///
/// Validation order (first failure wins):
/// 1. every line resolves via `product_lookup`, else
///    [`CheckoutError::InvalidCartItem`]
/// 2. total > 0, else [`CheckoutError::EmptyCart`]
/// 3. balance covers the total, else
///    [`CheckoutError::InsufficientBalance`]
/// 4. an address id was supplied, else [`CheckoutError::MissingAddress`]
/// 5. the address id is one of the user's, else
///    [`CheckoutError::AddressNotFound`]
///
/// # Errors
///
/// See above; additionally [`CheckoutError::TotalOverflow`] if the sum
/// exceeds `i64` minor units.
pub fn totalize(
    user: &User,
    product_lookup: impl Fn(&ProductId) -> Option<Product>,
    address_id: Option<&AddressId>,
) -> Result<CheckoutResult, CheckoutError> {
    let mut line_items = Vec::with_capacity(user.cart.len());
    let mut total = Money::ZERO;

    for cart_line in &user.cart {
        let product = product_lookup(&cart_line.product_id)
            .ok_or_else(|| CheckoutError::InvalidCartItem(cart_line.product_id.clone()))?;
        let line_total = product
            .cost
            .checked_mul_qty(cart_line.qty)
            .ok_or(CheckoutError::TotalOverflow)?;
        total = total
            .checked_add(line_total)
            .ok_or(CheckoutError::TotalOverflow)?;
        line_items.push(LineItem {
            name: product.name,
            unit_cost: product.cost,
            qty: cart_line.qty,
        });
    }

    if total <= Money::ZERO {
        return Err(CheckoutError::EmptyCart);
    }
    if user.balance < total {
        return Err(CheckoutError::InsufficientBalance {
            balance: user.balance,
            total,
        });
    }
    let address_id = address_id.ok_or(CheckoutError::MissingAddress)?;
    if !user.has_address(address_id) {
        return Err(CheckoutError::AddressNotFound(address_id.clone()));
    }

    Ok(CheckoutResult { line_items, total })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Address, CartLine};
    use crate::types::UserId;

    fn product(id: &str, name: &str, cost: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            category: "Fashion".to_owned(),
            cost: Money::from_minor(cost),
            rating: 4,
            image_url: format!("https://example.com/{id}.png"),
        }
    }

    fn catalog(id: &ProductId) -> Option<Product> {
        match id.as_str() {
            "p1" => Some(product("p1", "Tan Leatherette Weekender Duffle", 100)),
            "p2" => Some(product("p2", "The Minimalist Slim Leather Watch", 250)),
            _ => None,
        }
    }

    fn user(balance: i64, cart: Vec<CartLine>) -> User {
        User {
            id: UserId::new("u1"),
            username: "crio.do".to_owned(),
            balance: Money::from_minor(balance),
            cart,
            addresses: vec![Address {
                id: AddressId::new("a1"),
                street: "14 Main St".to_owned(),
            }],
            token: None,
            created_at: Utc::now(),
        }
    }

    fn line(id: &str, qty: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            qty,
        }
    }

    #[test]
    fn test_total_sums_qty_times_cost() {
        let user = user(5000, vec![line("p1", 2), line("p2", 1)]);
        let result =
            totalize(&user, catalog, Some(&AddressId::new("a1"))).expect("checkout succeeds");
        assert_eq!(result.total, Money::from_minor(450));
        assert_eq!(
            result.line_items,
            vec![
                LineItem {
                    name: "Tan Leatherette Weekender Duffle".to_owned(),
                    unit_cost: Money::from_minor(100),
                    qty: 2,
                },
                LineItem {
                    name: "The Minimalist Slim Leather Watch".to_owned(),
                    unit_cost: Money::from_minor(250),
                    qty: 1,
                },
            ]
        );
    }

    #[test]
    fn test_empty_cart_fails_regardless_of_balance() {
        let user = user(1_000_000, Vec::new());
        let err = totalize(&user, catalog, Some(&AddressId::new("a1"))).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_insufficient_balance_leaves_balance_alone() {
        let user = user(100, vec![line("p1", 2), line("p2", 1)]);
        let err = totalize(&user, catalog, Some(&AddressId::new("a1"))).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InsufficientBalance {
                balance: Money::from_minor(100),
                total: Money::from_minor(450),
            }
        );
        assert_eq!(user.balance, Money::from_minor(100));
    }

    #[test]
    fn test_missing_address_checked_after_balance() {
        let user = user(5000, vec![line("p1", 1)]);
        let err = totalize(&user, catalog, None).unwrap_err();
        assert_eq!(err, CheckoutError::MissingAddress);
    }

    #[test]
    fn test_unknown_address_is_distinct_from_missing() {
        let user = user(5000, vec![line("p1", 1)]);
        let err = totalize(&user, catalog, Some(&AddressId::new("nope"))).unwrap_err();
        assert_eq!(err, CheckoutError::AddressNotFound(AddressId::new("nope")));
    }

    #[test]
    fn test_stale_product_aborts_whole_checkout() {
        // One bad line fails everything; no partial order is produced.
        let user = user(5000, vec![line("p1", 1), line("removed", 1)]);
        let err = totalize(&user, catalog, Some(&AddressId::new("a1"))).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidCartItem(ProductId::new("removed"))
        );
    }

    #[test]
    fn test_stale_product_wins_over_balance_check() {
        // Fail-fast on resolution, before any balance comparison.
        let user = user(0, vec![line("removed", 1)]);
        let err = totalize(&user, catalog, None).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidCartItem(ProductId::new("removed"))
        );
    }

    #[test]
    fn test_totalize_does_not_touch_cart() {
        let user = user(5000, vec![line("p1", 2), line("p2", 1)]);
        let before = user.cart.clone();
        let _ = totalize(&user, catalog, Some(&AddressId::new("a1"))).expect("checkout succeeds");
        assert_eq!(user.cart, before);
    }

    #[test]
    fn test_overflowing_total_is_surfaced() {
        let pricey = |_: &ProductId| Some(product("p1", "Gold Bar", i64::MAX));
        let user = user(5000, vec![line("p1", 2)]);
        let err = totalize(&user, pricey, Some(&AddressId::new("a1"))).unwrap_err();
        assert_eq!(err, CheckoutError::TotalOverflow);
    }
}
