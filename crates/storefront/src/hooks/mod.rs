//! Checkout extension points.
//!
//! The checkout pipeline exposes named extension points. Features attach
//! handlers to them instead of being called directly:
//!
//! - **Markup hooks** ([`MarkupHook`]) emit HTML at a fixed place in a page.
//! - **Payload filters** ([`PayloadFilter`]) see the serialized checkout form
//!   on every refresh, may act on the cart, and must hand the payload on
//!   unchanged to the next filter.
//!
//! ```text
//! review_order_after_order_total  markup   row after the order-total row
//! checkout_update_order_review    filter   every checkout refresh payload
//! footer                          markup   end of every storefront page
//! ```

mod cart_sync;
mod debounce_script;
mod quantity_field;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use checkout_quantity_core::{Cart, LabelSettings};

pub use cart_sync::CartQuantitySync;
pub use debounce_script::{QuantityDebounceScript, REFRESH_EVENT};
pub use quantity_field::QuantityFieldRow;

/// Named places in the storefront where handlers attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Inside the order-review table, immediately after the order-total row.
    ReviewOrderAfterOrderTotal,
    /// Every checkout refresh, with the serialized checkout form.
    CheckoutUpdateOrderReview,
    /// End of the page body.
    Footer,
}

impl ExtensionPoint {
    /// Stable name of the extension point, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReviewOrderAfterOrderTotal => "review_order_after_order_total",
            Self::CheckoutUpdateOrderReview => "checkout_update_order_review",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which storefront page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// The cart page.
    Cart,
    /// The checkout page with the order review.
    Checkout,
}

/// What a markup hook can see while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The session cart, if one was ever created.
    pub cart: Option<&'a Cart>,
    /// The page being rendered.
    pub page: Page,
    /// CSP nonce for inline scripts.
    pub nonce: &'a str,
}

/// A handler that emits markup at an extension point.
#[async_trait]
pub trait MarkupHook: Send + Sync {
    /// Render markup. Must not fail; return an empty string to emit nothing.
    async fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// A handler that sees each checkout refresh payload.
pub trait PayloadFilter: Send + Sync {
    /// Inspect `posted` and act on `cart`. Returns the payload for the next
    /// filter; handlers in this crate return it unchanged.
    fn filter(&self, posted: String, cart: Option<&mut Cart>) -> String;
}

/// Handlers registered per extension point, run in registration order.
#[derive(Default, Clone)]
pub struct HookRegistry {
    markup: HashMap<ExtensionPoint, Vec<Arc<dyn MarkupHook>>>,
    filters: HashMap<ExtensionPoint, Vec<Arc<dyn PayloadFilter>>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a markup hook.
    pub fn add_markup(&mut self, point: ExtensionPoint, hook: Arc<dyn MarkupHook>) {
        self.markup.entry(point).or_default().push(hook);
    }

    /// Attach a payload filter.
    pub fn add_filter(&mut self, point: ExtensionPoint, filter: Arc<dyn PayloadFilter>) {
        self.filters.entry(point).or_default().push(filter);
    }

    /// Render every markup hook at `point` and concatenate the output.
    pub async fn render(&self, point: ExtensionPoint, ctx: &RenderContext<'_>) -> String {
        let mut out = String::new();
        for hook in self.markup.get(&point).into_iter().flatten() {
            out.push_str(&hook.render(ctx).await);
        }
        out
    }

    /// Run every filter at `point`, threading the payload through them.
    pub fn apply_filters(
        &self,
        point: ExtensionPoint,
        posted: String,
        mut cart: Option<&mut Cart>,
    ) -> String {
        let mut payload = posted;
        for filter in self.filters.get(&point).into_iter().flatten() {
            payload = filter.filter(payload, cart.as_deref_mut());
        }
        tracing::trace!(extension_point = %point, "Applied payload filters");
        payload
    }

    /// Registry with the checkout quantity feature attached.
    #[must_use]
    pub fn with_checkout_quantity(labels: LabelSettings, debounce_delay: Duration) -> Self {
        let mut hooks = Self::new();
        hooks.add_markup(
            ExtensionPoint::ReviewOrderAfterOrderTotal,
            Arc::new(QuantityFieldRow::new(labels)),
        );
        hooks.add_filter(
            ExtensionPoint::CheckoutUpdateOrderReview,
            Arc::new(CartQuantitySync),
        );
        hooks.add_markup(
            ExtensionPoint::Footer,
            Arc::new(QuantityDebounceScript::new(debounce_delay)),
        );
        hooks
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markup: HashMap<_, _> = self.markup.iter().map(|(k, v)| (k, v.len())).collect();
        let filters: HashMap<_, _> = self.filters.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("HookRegistry")
            .field("markup", &markup)
            .field("filters", &filters)
            .finish()
    }
}
