//! Business services for storefront.

pub mod cart;

pub use cart::{load_cart, save_cart};
