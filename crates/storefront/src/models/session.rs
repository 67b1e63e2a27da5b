//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
