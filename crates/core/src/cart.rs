//! Local canteen cart.
//!
//! The cart lives only for the duration of one ordering session. It merges
//! repeated additions of the same item and computes a preview total; the
//! authoritative total comes back on the bill.

use crate::types::{MenuItemId, Rupees};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: Rupees,
    pub qty: u32,
}

impl CartLine {
    /// Price of the line (`unit_price * qty`).
    #[must_use]
    pub fn line_total(&self) -> Rupees {
        self.unit_price.times(self.qty)
    }
}

/// A canteen cart, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `qty` of an item. Adding an item already in the cart bumps its
    /// quantity instead of creating a second line. Adding zero is a no-op.
    pub fn add(&mut self, item_id: MenuItemId, name: &str, unit_price: Rupees, qty: u32) {
        if qty == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.qty = line.qty.saturating_add(qty);
            return;
        }
        self.lines.push(CartLine {
            item_id,
            name: name.to_owned(),
            unit_price,
            qty,
        });
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Preview total of the cart.
    #[must_use]
    pub fn total(&self) -> Rupees {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
