//! Client-side debouncer for the quantity input.

use std::time::Duration;

use askama::Template;
use async_trait::async_trait;

use checkout_quantity_core::QUANTITY_FIELD;

use super::{MarkupHook, Page, RenderContext};

/// Event the checkout page listens for to refresh the order review.
pub const REFRESH_EVENT: &str = "update-checkout";

#[derive(Template)]
#[template(path = "partials/debounce_script.html")]
struct DebounceScriptTemplate<'a> {
    nonce: &'a str,
    field: &'a str,
    event: &'a str,
    delay_ms: u128,
}

/// Inline script that coalesces quantity edits into one checkout refresh.
///
/// Mirrors [`crate::debounce::Debouncer`]: each `input` event re-arms a timer,
/// and the refresh event fires once the field has been idle for the delay.
/// Emitted on the checkout page only.
#[derive(Debug, Clone, Copy)]
pub struct QuantityDebounceScript {
    delay: Duration,
}

impl QuantityDebounceScript {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MarkupHook for QuantityDebounceScript {
    async fn render(&self, ctx: &RenderContext<'_>) -> String {
        if ctx.page != Page::Checkout {
            return String::new();
        }

        let template = DebounceScriptTemplate {
            nonce: ctx.nonce,
            field: QUANTITY_FIELD,
            event: REFRESH_EVENT,
            delay_ms: self.delay.as_millis(),
        };

        template.render().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to render quantity debounce script");
            String::new()
        })
    }
}
