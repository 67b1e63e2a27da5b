//! Checkout Quantity Core - Shared types library.
//!
//! This crate provides the types and rules shared by all Checkout Quantity
//! components:
//! - `storefront` - Customer-facing checkout with the quantity field
//! - `admin` - Settings page for the quantity field label
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no HTTP, no
//! connection management. With the `postgres` feature it also provides the
//! `PgSettingsStore` shared by the storefront and admin binaries, which hand
//! it the pool they own.
//!
//! # Modules
//!
//! - [`cart`] - Cart, line items and the display-quantity aggregator
//! - [`payload`] - Checkout refresh payload parsing
//! - [`settings`] - Settings store abstraction and the label setting
//! - [`types`] - Newtype wrappers for quantities, IDs, emails and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod payload;
pub mod settings;
pub mod types;

pub use cart::{Cart, CartItemKey, LineItem, compute_display_quantity};
pub use payload::{QUANTITY_FIELD, submitted_quantity};
pub use settings::{
    DEFAULT_LABEL, LABEL_OPTION_KEY, LabelSettings, MemorySettingsStore, SettingsError,
    SettingsStore,
};
#[cfg(feature = "postgres")]
pub use settings::PgSettingsStore;
pub use types::*;
