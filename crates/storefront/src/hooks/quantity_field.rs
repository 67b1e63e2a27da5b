//! Checkout field renderer: the labeled quantity input in the order review.

use askama::Template;
use async_trait::async_trait;

use checkout_quantity_core::{LabelSettings, QUANTITY_FIELD, compute_display_quantity};

use super::{MarkupHook, RenderContext};

/// Upper bound advertised to the browser. Not enforced on the server.
pub const INPUT_MAX: u32 = 999;

/// Table row with the quantity input.
#[derive(Template)]
#[template(path = "partials/quantity_row.html")]
struct QuantityRowTemplate<'a> {
    label: &'a str,
    field: &'a str,
    quantity: u64,
    max: u32,
}

/// Renders the quantity row after the order-total row.
///
/// The label comes from the settings store and is HTML-escaped; the value is
/// the cart's display quantity.
#[derive(Debug, Clone)]
pub struct QuantityFieldRow {
    labels: LabelSettings,
}

impl QuantityFieldRow {
    /// Create the renderer.
    #[must_use]
    pub const fn new(labels: LabelSettings) -> Self {
        Self { labels }
    }
}

#[async_trait]
impl MarkupHook for QuantityFieldRow {
    async fn render(&self, ctx: &RenderContext<'_>) -> String {
        let label = self.labels.get_label().await;
        let template = QuantityRowTemplate {
            label: &label,
            field: QUANTITY_FIELD,
            quantity: compute_display_quantity(ctx.cart),
            max: INPUT_MAX,
        };

        template.render().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to render checkout quantity row");
            String::new()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use checkout_quantity_core::{Cart, MemorySettingsStore, Quantity};
    use rust_decimal::Decimal;

    use super::*;
    use crate::hooks::Page;

    fn renderer() -> (QuantityFieldRow, LabelSettings) {
        let labels = LabelSettings::new(Arc::new(MemorySettingsStore::new()));
        (QuantityFieldRow::new(labels.clone()), labels)
    }

    fn ctx(cart: Option<&Cart>) -> RenderContext<'_> {
        RenderContext {
            cart,
            page: Page::Checkout,
            nonce: "",
        }
    }

    #[tokio::test]
    async fn test_renders_default_label_and_one_without_cart() {
        let (row, _) = renderer();
        let html = row.render(&ctx(None)).await;

        assert!(html.contains(r#"<tr class="checkout-quantity-row">"#));
        assert!(html.contains("<th>How Many Minutes?</th>"));
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"id="checkout-quantity""#));
        assert!(html.contains(r#"name="checkout-quantity""#));
        assert!(html.contains(r#"min="1""#));
        assert!(html.contains(r#"max="999""#));
        assert!(html.contains(r#"value="1""#));
    }

    #[tokio::test]
    async fn test_value_is_cart_sum() {
        let (row, _) = renderer();
        let mut cart = Cart::new();
        cart.add("a", "A", Decimal::ONE, Quantity::clamped(2));
        cart.add("b", "B", Decimal::ONE, Quantity::clamped(3));

        let html = row.render(&ctx(Some(&cart))).await;
        assert!(html.contains(r#"value="5""#));
    }

    #[tokio::test]
    async fn test_label_is_escaped() {
        let (row, labels) = renderer();
        labels
            .set_label(r#"<script>alert("x")</script>"#)
            .await
            .unwrap();

        let html = row.render(&ctx(None)).await;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_empty_label_renders_empty_header() {
        let (row, labels) = renderer();
        labels.set_label("").await.unwrap();

        let html = row.render(&ctx(None)).await;
        assert!(html.contains("<th></th>"));
    }
}
