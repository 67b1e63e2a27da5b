//! Checkout route handlers.
//!
//! The checkout page renders the order review table inside the checkout form.
//! Whenever the page asks for a refresh it posts the whole serialized form to
//! `/checkout/update-order-review`; the payload filters run over it, the cart
//! is written back if a filter changed it, and the freshly rendered order
//! review is returned for the page to swap in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use checkout_quantity_core::Cart;

use crate::error::Result;
use crate::hooks::{ExtensionPoint, Page, REFRESH_EVENT, RenderContext};
use crate::middleware::CspNonce;
use crate::services::{load_cart, save_cart};
use crate::state::AppState;

use super::cart::CartView;

/// Order review table fragment.
#[derive(Template)]
#[template(path = "partials/order_review.html")]
pub struct OrderReviewTemplate {
    pub cart: CartView,
    /// Markup from the `review_order_after_order_total` extension point.
    pub after_order_total: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub order_review: String,
    pub refresh_event: &'static str,
    pub footer: String,
    pub nonce: String,
}

/// Render the order review table for a cart.
async fn render_order_review(state: &AppState, cart: &Cart, nonce: &str) -> Result<String> {
    let after_order_total = state
        .hooks()
        .render(
            ExtensionPoint::ReviewOrderAfterOrderTotal,
            &RenderContext {
                cart: Some(cart),
                page: Page::Checkout,
                nonce,
            },
        )
        .await;

    let template = OrderReviewTemplate {
        cart: CartView::from(cart),
        after_order_total,
    };
    Ok(template.render()?)
}

/// Display checkout page.
///
/// An empty or missing cart has nothing to check out and is sent back to the
/// cart page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let Some(cart) = load_cart(&session).await.filter(|cart| !cart.is_empty()) else {
        tracing::debug!("Checkout requested with empty cart");
        return Ok(Redirect::to("/cart").into_response());
    };

    let order_review = render_order_review(&state, &cart, &nonce).await?;

    let footer = state
        .hooks()
        .render(
            ExtensionPoint::Footer,
            &RenderContext {
                cart: Some(&cart),
                page: Page::Checkout,
                nonce: &nonce,
            },
        )
        .await;

    Ok(CheckoutShowTemplate {
        order_review,
        refresh_event: REFRESH_EVENT,
        footer,
        nonce,
    }
    .into_response())
}

/// Checkout refresh.
///
/// The raw `application/x-www-form-urlencoded` body is handed to the
/// `checkout_update_order_review` filters unparsed.
#[instrument(skip(state, session, nonce, body), fields(payload_len = body.len()))]
pub async fn update_order_review(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    body: String,
) -> Result<Html<String>> {
    let mut cart = load_cart(&session).await;
    let before = cart.clone();

    state
        .hooks()
        .apply_filters(ExtensionPoint::CheckoutUpdateOrderReview, body, cart.as_mut());

    if let Some(updated) = cart.as_ref().filter(|c| before.as_ref() != Some(*c)) {
        save_cart(&session, updated).await?;
        tracing::info!(
            total_quantity = updated.total_quantity(),
            "Cart updated from checkout refresh"
        );
    }

    let cart = cart.unwrap_or_default();
    Ok(Html(render_order_review(&state, &cart, &nonce).await?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::{StatusCode, header};

    use checkout_quantity_core::{LabelSettings, MemorySettingsStore, SettingsStore};

    use crate::test_support::{Client, app, body_text};

    async fn client_with_a2_b3(settings: Arc<dyn SettingsStore>) -> Client {
        let mut client = Client::new(app(settings));
        let added = client
            .post_form("/cart/add", "product_id=consult-30&quantity=2")
            .await;
        assert_eq!(added.status(), StatusCode::SEE_OTHER);
        client
            .post_form("/cart/add", "product_id=followup-15&quantity=3")
            .await;
        client
    }

    #[tokio::test]
    async fn test_checkout_shows_cart_sum_and_default_label() {
        let mut client = client_with_a2_b3(Arc::new(MemorySettingsStore::new())).await;

        let response = client.get("/checkout").await;
        assert_eq!(response.status(), StatusCode::OK);

        let csp = response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .to_owned();
        let body = body_text(response).await;

        assert!(body.contains(r#"<tr class="checkout-quantity-row">"#));
        assert!(body.contains("<th>How Many Minutes?</th>"));
        assert!(body.contains(r#"value="5""#));
        assert!(body.contains(r#"min="1" max="999""#));
        // Field row sits after the order-total row.
        let total_row = body.find(r#"class="order-total""#).unwrap();
        let quantity_row = body.find("checkout-quantity-row").unwrap();
        assert!(total_row < quantity_row);
        // Debounce script is emitted with the same nonce the CSP allows.
        assert!(body.contains("}, 350);"));
        assert!(csp.contains("'nonce-"));
    }

    #[tokio::test]
    async fn test_checkout_uses_saved_label() {
        let settings: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
        LabelSettings::new(Arc::clone(&settings))
            .set_label("Custom <Label>")
            .await
            .unwrap();
        let mut client = client_with_a2_b3(settings).await;

        let body = body_text(client.get("/checkout").await).await;
        assert!(body.contains("<th>Custom &#60;Label&#62;</th>"));
    }

    #[tokio::test]
    async fn test_update_order_review_broadcasts_quantity() {
        let mut client = client_with_a2_b3(Arc::new(MemorySettingsStore::new())).await;

        let response = client
            .post_form(
                "/checkout/update-order-review",
                "billing_name=Ada&checkout-quantity=4",
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let fragment = body_text(response).await;
        assert!(fragment.starts_with(r#"<table class="order-review">"#));
        assert!(fragment.contains(r#"value="8""#));
        assert!(fragment.contains("&times; 4"));

        // The change was written back to the session.
        let cart_page = body_text(client.get("/cart").await).await;
        assert!(cart_page.contains("Items: 8"));
    }

    #[tokio::test]
    async fn test_update_order_review_without_key_keeps_cart() {
        let mut client = client_with_a2_b3(Arc::new(MemorySettingsStore::new())).await;

        let fragment = body_text(
            client
                .post_form("/checkout/update-order-review", "billing_name=Ada")
                .await,
        )
        .await;
        assert!(fragment.contains(r#"value="5""#));
    }

    #[tokio::test]
    async fn test_update_order_review_clamps_invalid_quantity() {
        let mut client = client_with_a2_b3(Arc::new(MemorySettingsStore::new())).await;

        let fragment = body_text(
            client
                .post_form("/checkout/update-order-review", "checkout-quantity=-7")
                .await,
        )
        .await;
        assert!(fragment.contains(r#"value="2""#));
    }

    #[tokio::test]
    async fn test_update_order_review_without_cart_renders_default() {
        let mut client = Client::new(app(Arc::new(MemorySettingsStore::new())));

        let response = client
            .post_form("/checkout/update-order-review", "checkout-quantity=4")
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"value="1""#));
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_redirects() {
        let mut client = Client::new(app(Arc::new(MemorySettingsStore::new())));

        let response = client.get("/checkout").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/cart");
    }
}
