//! HTTP middleware for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication and capability checks are extractors, not layers, so each
//! route states what it needs.

pub mod auth;
pub mod csrf;
pub mod session;

pub use auth::{
    AdminAuthRejection, RequireAdminAuth, clear_current_admin, require_capability,
    set_current_admin,
};
pub use csrf::{csrf_token, verify_csrf_token};
pub use session::create_session_layer;
