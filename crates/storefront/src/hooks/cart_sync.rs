//! Cart synchronizer: broadcast the submitted quantity to every line item.

use checkout_quantity_core::{Cart, submitted_quantity};

use super::PayloadFilter;

/// Overwrites every line item's quantity with the submitted checkout quantity.
///
/// - No quantity key in the payload: the cart is left as-is.
/// - No cart, or an empty cart: nothing to do.
/// - Non-numeric or non-positive values clamp to 1.
///
/// The payload is always returned untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartQuantitySync;

impl PayloadFilter for CartQuantitySync {
    fn filter(&self, posted: String, cart: Option<&mut Cart>) -> String {
        let Some(quantity) = submitted_quantity(&posted) else {
            return posted;
        };

        let Some(cart) = cart else {
            tracing::debug!("No cart in session, skipping quantity sync");
            return posted;
        };

        let keys: Vec<_> = cart.items().iter().map(|item| item.key.clone()).collect();
        for key in &keys {
            cart.set_quantity(key, quantity);
        }

        tracing::debug!(
            quantity = quantity.get(),
            line_items = keys.len(),
            "Synchronized cart quantities"
        );
        posted
    }
}
