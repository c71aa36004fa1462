//! Canteen menu, orders and bills.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{Cart, MenuItemId, OrderId, Rupees, UserId};

fn default_emoji() -> String {
    "🍽️".to_string()
}

/// An item on the canteen menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Rupees,
    pub category: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
}

/// Response of `GET /canteen/menu`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Look up a menu item by ID.
    #[must_use]
    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

/// One line of an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub id: MenuItemId,
    pub qty: u32,
}

/// Body of `POST /canteen/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
}

impl From<&Cart> for OrderRequest {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| OrderLine {
                    id: line.item_id,
                    qty: line.qty,
                })
                .collect(),
        }
    }
}

/// A line on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BillItem {
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub qty: u32,
    pub unit_price: Rupees,
    pub line_total: Rupees,
}

/// Soft bill (receipt) for a canteen order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bill {
    pub order_id: OrderId,
    pub student_id: UserId,
    pub vendor: String,
    #[serde(default)]
    pub items: Vec<BillItem>,
    pub total: Rupees,
    pub txn_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub payment_method: String,
}

/// Response of `POST /canteen/order`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedOrder {
    #[serde(default)]
    pub message: String,
    pub order_id: OrderId,
    #[serde(default)]
    pub txn_id: String,
    pub bill: Bill,
}

/// Response of `GET /canteen/orders/{id}/bill`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BillResponse {
    pub bill: Bill,
}

/// An item within an order history entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub qty: u32,
    pub price: Rupees,
}

/// An entry in the student's order history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub total: Rupees,
    #[serde(default)]
    pub txn_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Response of `GET /canteen/orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderHistory {
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
}
