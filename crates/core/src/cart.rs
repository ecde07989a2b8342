//! Cart and cart-item types.
//!
//! The cart is client-held: the API receives the full item list with each
//! checkout or order submission and recomputes the total server-side. A
//! client-supplied total is never trusted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MealId, Price};

/// A single line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// The meal this line refers to.
    pub id: MealId,
    /// Display name, snapshotted at the time the item was added.
    pub name: String,
    /// Image path or URL for display.
    pub image: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Number of units. Always at least 1 inside a [`Cart`].
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (`unit price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount * Decimal::from(self.quantity)
    }
}

/// A collection of cart items with quantity bookkeeping.
///
/// Items are keyed by meal id: adding an item that is already present
/// merges quantities instead of duplicating the line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, merging duplicate lines and dropping
    /// zero-quantity lines.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add an item to the cart.
    ///
    /// If a line for the same meal already exists its quantity is
    /// increased; the existing snapshot (name, price, image) wins.
    /// Items with quantity 0 are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Set the quantity of an existing line. A quantity of 0 removes it.
    ///
    /// Returns `false` if no line for `id` exists.
    pub fn set_quantity(&mut self, id: MealId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line from the cart. Returns `false` if it was not present.
    pub fn remove(&mut self, id: MealId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Remove all lines. Done after a successful order submission.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Running total: the sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
