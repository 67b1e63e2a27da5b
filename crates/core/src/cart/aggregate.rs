//! Display quantity shown in the checkout field.

use super::Cart;

/// Compute the quantity to pre-fill in the checkout field.
///
/// Sums the quantities of every line item and floors the result at 1, so a
/// missing or empty cart shows 1 rather than 0.
///
/// After a synchronization every line carries the same quantity `n`, so a
/// cart with `k` lines displays `n * k`, not `n`.
#[must_use]
pub fn compute_display_quantity(cart: Option<&Cart>) -> u64 {
    cart.map_or(0, Cart::total_quantity).max(1)
}
