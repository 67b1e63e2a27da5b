//! Cart and line-item types.
//!
//! The cart belongs to the commerce session, not to the checkout quantity
//! feature. The feature only reads it (to show a quantity) and overwrites the
//! quantities of its line items (to synchronize them).

mod aggregate;

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Quantity;

pub use aggregate::compute_display_quantity;

/// Identifies one line item within a cart.
///
/// A product added twice lands on the same key, so the key is derived from
/// the product ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemKey(String);

impl CartItemKey {
    /// Build the key for a product.
    #[must_use]
    pub fn for_product(product_id: &str) -> Self {
        Self(format!("line-{product_id}"))
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CartItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One distinct product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Key of this line within the cart.
    pub key: CartItemKey,
    /// Catalog product ID.
    pub product_id: String,
    /// Product title shown in the order review.
    pub title: String,
    /// Price of a single unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: Quantity,
}

impl LineItem {
    /// Price of the whole line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

/// An ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Find a line item by key.
    #[must_use]
    pub fn get(&self, key: &CartItemKey) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    /// Add units of a product.
    ///
    /// If the product already has a line, its quantity grows by `quantity`
    /// (saturating). Returns the key of the affected line.
    pub fn add(
        &mut self,
        product_id: &str,
        title: &str,
        unit_price: Decimal,
        quantity: Quantity,
    ) -> CartItemKey {
        let key = CartItemKey::for_product(product_id);

        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            let combined = i64::from(existing.quantity.get()) + i64::from(quantity.get());
            existing.quantity = Quantity::clamped(combined);
        } else {
            self.items.push(LineItem {
                key: key.clone(),
                product_id: product_id.to_owned(),
                title: title.to_owned(),
                unit_price,
                quantity,
            });
        }

        key
    }

    /// Remove a line item. Returns `true` if it was present.
    pub fn remove(&mut self, key: &CartItemKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.key != key);
        self.items.len() != before
    }

    /// Set the quantity of one line item. Returns `true` if it was present.
    pub fn set_quantity(&mut self, key: &CartItemKey, quantity: Quantity) -> bool {
        match self.items.iter_mut().find(|item| &item.key == key) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Sum of all line-item quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Order total. There are no taxes, fees or shipping lines, so this equals
    /// the subtotal.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }
}
