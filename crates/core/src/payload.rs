//! Checkout refresh payload parsing.
//!
//! Every checkout refresh posts the whole checkout form as an
//! `application/x-www-form-urlencoded` string. Only the quantity field is
//! read here; all other keys are ignored.

use crate::types::Quantity;

/// Name of the checkout quantity input and of its key in refresh payloads.
pub const QUANTITY_FIELD: &str = "checkout-quantity";

/// Extract the submitted quantity from a serialized checkout form.
///
/// Returns `None` if the payload has no quantity key. A present but
/// non-numeric or non-positive value clamps to [`Quantity::MIN`]. If the key
/// repeats, the last occurrence wins.
///
/// ## Examples
///
/// ```
/// use checkout_quantity_core::submitted_quantity;
///
/// assert_eq!(submitted_quantity("billing_email=a%40b.c&checkout-quantity=4").map(|q| q.get()), Some(4));
/// assert_eq!(submitted_quantity("checkout-quantity=abc").map(|q| q.get()), Some(1));
/// assert_eq!(submitted_quantity("billing_email=a%40b.c"), None);
/// ```
#[must_use]
pub fn submitted_quantity(payload: &str) -> Option<Quantity> {
    url::form_urlencoded::parse(payload.as_bytes())
        .filter(|(key, _)| key == QUANTITY_FIELD)
        .last()
        .map(|(_, value)| Quantity::from_submitted(&value))
}
