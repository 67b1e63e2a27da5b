//! Cart route handlers.
//!
//! The cart lives in the session. Adding a catalog product merges into an
//! existing line for the same product.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use checkout_quantity_core::{Cart, CartItemKey, Quantity, compute_display_quantity};

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::hooks::{ExtensionPoint, Page, RenderContext};
use crate::middleware::CspNonce;
use crate::services::{load_cart, save_cart};
use crate::state::AppState;

use super::format_price;

/// Line item display data for templates.
#[derive(Debug, Clone)]
pub struct LineItemView {
    pub key: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| LineItemView {
                    key: item.key.to_string(),
                    title: item.title.clone(),
                    quantity: item.quantity.get(),
                    price: format_price(item.unit_price),
                    line_price: format_price(item.line_total()),
                })
                .collect(),
            subtotal: format_price(cart.subtotal()),
            total: format_price(cart.total()),
            item_count: cart.total_quantity(),
        }
    }
}

/// Catalog product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: format_price(product.price),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub key: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub products: Vec<ProductView>,
    pub display_quantity: u64,
    pub footer: String,
    pub nonce: String,
}

/// Display cart page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    let footer = state
        .hooks()
        .render(
            ExtensionPoint::Footer,
            &RenderContext {
                cart: cart.as_ref(),
                page: Page::Cart,
                nonce: &nonce,
            },
        )
        .await;

    CartShowTemplate {
        cart: cart.as_ref().map_or_else(CartView::empty, CartView::from),
        products: state.catalog().products().iter().map(ProductView::from).collect(),
        display_quantity: compute_display_quantity(cart.as_ref()),
        footer,
        nonce,
    }
}

/// Add a catalog product to the cart.
///
/// A missing or unparseable quantity adds one unit.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .get(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let quantity = form
        .quantity
        .as_deref()
        .map_or(Quantity::MIN, Quantity::from_submitted);

    let mut cart = load_cart(&session).await.unwrap_or_default();
    let key = cart.add(&product.id, &product.title, product.price, quantity);
    save_cart(&session, &cart).await?;

    tracing::info!(
        product_id = %product.id,
        line_item = %key,
        quantity = quantity.get(),
        "Added product to cart"
    );

    Ok(Redirect::to("/cart"))
}

/// Remove a line item from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let Some(mut cart) = load_cart(&session).await else {
        return Ok(Redirect::to("/cart"));
    };

    let key = CartItemKey::from(form.key);
    if cart.remove(&key) {
        save_cart(&session, &cart).await?;
        tracing::info!(line_item = %key, "Removed line item from cart");
    } else {
        tracing::debug!(line_item = %key, "Line item not in cart");
    }

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use checkout_quantity_core::MemorySettingsStore;

    use crate::test_support::{Client, app, body_text};

    fn client() -> Client {
        Client::new(app(Arc::new(MemorySettingsStore::new())))
    }

    #[tokio::test]
    async fn test_empty_cart_page() {
        let mut client = client();
        let response = client.get("/cart").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Your cart is empty."));
        assert!(body.contains(r#"value="consult-30""#));
        // The quantity debounce script is checkout-only.
        assert!(!body.contains("update-checkout"));
    }

    #[tokio::test]
    async fn test_add_merges_and_remove_drops_line() {
        let mut client = client();
        client
            .post_form("/cart/add", "product_id=consult-30&quantity=2")
            .await;
        client.post_form("/cart/add", "product_id=consult-30").await;

        let body = body_text(client.get("/cart").await).await;
        assert!(body.contains("Items: 3"));
        assert!(body.contains("$135.00"));

        let removed = client
            .post_form("/cart/remove", "key=line-consult-30")
            .await;
        assert_eq!(removed.status(), StatusCode::SEE_OTHER);
        assert!(body_text(client.get("/cart").await).await.contains("Your cart is empty."));
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let mut client = client();
        let response = client.post_form("/cart/add", "product_id=nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_add_quantity_adds_one() {
        let mut client = client();
        client
            .post_form("/cart/add", "product_id=review-60&quantity=lots")
            .await;
        assert!(body_text(client.get("/cart").await).await.contains("Items: 1"));
    }
}
