//! Core types for Checkout Quantity.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod quantity;
pub mod role;

pub use email::{Email, EmailError};
pub use id::AdminUserId;
pub use quantity::{Quantity, coerce_int};
pub use role::{AdminRole, Capability};
