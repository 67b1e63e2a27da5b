//! Session-backed cart storage.
//!
//! The cart lives in the visitor's session. A session that never had a cart
//! (no item added yet) yields `None`, which checkout treats as "no cart".

use tower_sessions::Session;

use checkout_quantity_core::Cart;

use crate::models::session_keys;

/// Load the cart from the session.
///
/// Session read errors are logged and treated as a missing cart.
pub async fn load_cart(session: &Session) -> Option<Cart> {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart from session");
            None
        }
    }
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}
