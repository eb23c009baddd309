//! Cart reconciliation.
//!
//! [`reconcile`] computes the next cart state for a requested mutation.
//! It performs no I/O: the caller supplies a product-existence check and
//! persists the returned cart verbatim as the user's new authoritative
//! cart. Quantities are absolute sets, never deltas.

use crate::error::CartError;
use crate::models::CartLine;
use crate::types::ProductId;

/// Compute the next cart state for a `(product_id, requested_qty)` mutation.
///
/// Semantics:
/// - qty > 0, no existing line: append a new line at the end
/// - qty > 0, existing line: overwrite that line's quantity
/// - qty == 0, existing line: remove the line
/// - qty == 0, no existing line: no-op (not an error)
///
/// The order of untouched lines is always preserved.
///
/// # Errors
///
/// - [`CartError::ProductNotFound`] if `product_exists` rejects the id
/// - [`CartError::InvalidQuantity`] if `requested_qty` is negative (or
///   beyond `u32` range)
///
/// On error the input cart must not be persisted; the returned error is
/// the only effect.
pub fn reconcile(
    cart: &[CartLine],
    product_exists: impl FnOnce(&ProductId) -> bool,
    product_id: &ProductId,
    requested_qty: i64,
) -> Result<Vec<CartLine>, CartError> {
    if !product_exists(product_id) {
        return Err(CartError::ProductNotFound(product_id.clone()));
    }
    let qty =
        u32::try_from(requested_qty).map_err(|_| CartError::InvalidQuantity(requested_qty))?;

    let mut next = cart.to_vec();
    let position = next.iter().position(|line| line.product_id == *product_id);
    match position {
        None if qty > 0 => next.push(CartLine {
            product_id: product_id.clone(),
            qty,
        }),
        // Removing a line that was never added is a no-op.
        None => {}
        Some(index) if qty == 0 => {
            next.remove(index);
        }
        Some(index) => {
            if let Some(line) = next.get_mut(index) {
                line.qty = qty;
            }
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, qty: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            qty,
        }
    }

    fn any_product(_: &ProductId) -> bool {
        true
    }

    #[test]
    fn test_add_appends_new_line_at_end() {
        let cart = vec![line("p1", 2), line("p2", 1)];
        let next = reconcile(&cart, any_product, &ProductId::new("p3"), 4).expect("reconcile");
        assert_eq!(next, vec![line("p1", 2), line("p2", 1), line("p3", 4)]);
    }

    #[test]
    fn test_add_to_empty_cart() {
        let next = reconcile(&[], any_product, &ProductId::new("p1"), 1).expect("reconcile");
        assert_eq!(next, vec![line("p1", 1)]);
    }

    #[test]
    fn test_overwrite_is_absolute_not_delta() {
        let cart = vec![line("p1", 2)];
        let once = reconcile(&cart, any_product, &ProductId::new("p1"), 5).expect("reconcile");
        let twice = reconcile(&once, any_product, &ProductId::new("p1"), 5).expect("reconcile");
        // Idempotent: repeating the same set does not accumulate.
        assert_eq!(once, vec![line("p1", 5)]);
        assert_eq!(twice, once);
        // And equals a single set applied to the original cart.
        assert_eq!(
            reconcile(&cart, any_product, &ProductId::new("p1"), 5).expect("reconcile"),
            twice
        );
    }

    #[test]
    fn test_zero_qty_removes_line_preserving_order() {
        let cart = vec![line("p1", 2), line("p2", 1), line("p3", 7)];
        let next = reconcile(&cart, any_product, &ProductId::new("p2"), 0).expect("reconcile");
        assert_eq!(next, vec![line("p1", 2), line("p3", 7)]);
    }

    #[test]
    fn test_zero_qty_for_absent_line_is_noop() {
        let cart = vec![line("p1", 2)];
        let next = reconcile(&cart, any_product, &ProductId::new("p9"), 0).expect("reconcile");
        assert_eq!(next, cart);
    }

    #[test]
    fn test_unknown_product_fails_without_change() {
        let cart = vec![line("p1", 2)];
        let err = reconcile(&cart, |_| false, &ProductId::new("ghost"), 1).unwrap_err();
        assert_eq!(err, CartError::ProductNotFound(ProductId::new("ghost")));
        // Caller-visible cart is untouched on error.
        assert_eq!(cart, vec![line("p1", 2)]);
    }

    #[test]
    fn test_negative_qty_is_rejected() {
        let cart = vec![line("p1", 2)];
        let err = reconcile(&cart, any_product, &ProductId::new("p1"), -1).unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity(-1));
        assert_eq!(cart, vec![line("p1", 2)]);
    }
}
