//! Admin services.

pub mod auth;

pub use auth::{AdminAuthService, AuthError};
