//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness
//! GET  /health/ready                   - Readiness (settings store reachable)
//!
//! # Cart
//! GET  /                               - Redirect to cart
//! GET  /cart                           - Cart page
//! POST /cart/add                       - Add catalog product
//! POST /cart/remove                    - Remove line item
//!
//! # Checkout
//! GET  /checkout                       - Checkout page with order review
//! POST /checkout/update-order-review   - Checkout refresh (returns order review fragment)
//! ```

pub mod cart;
pub mod checkout;
pub mod health;

use axum::{
    Router,
    middleware::from_fn,
    response::Redirect,
    routing::{get, post},
};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::{csp_nonce_middleware, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Format a price for display.
pub(crate) fn format_price(amount: rust_decimal::Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/update-order-review", post(checkout::update_order_review))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/cart") }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}

/// Build the storefront application with its middleware stack.
///
/// Sentry and HTTP tracing layers are added by the binary; everything that
/// request handling depends on is applied here so tests see the same stack.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    routes()
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(csp_nonce_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(rust_decimal::Decimal::new(4500, 2)), "$45.00");
        assert_eq!(format_price(rust_decimal::Decimal::new(5, 1)), "$0.50");
        assert_eq!(format_price(rust_decimal::Decimal::new(19999, 3)), "$20.00");
    }
}
