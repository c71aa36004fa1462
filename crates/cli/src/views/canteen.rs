//! Canteen menu, cart preview, order history and bills.

use askama::Template;

use campus_wallet_client::{Bill, BillItem, Menu, MenuItem, OrderHistory, OrderSummary};
use campus_wallet_core::{Cart, CartLine, Rupees};

use super::{format_time, shortfall};

// =============================================================================
// Menu
// =============================================================================

#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub price: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            emoji: item.emoji.clone(),
            price: item.price.to_string(),
        }
    }
}

/// Menu items sharing a category.
#[derive(Debug, Clone)]
pub struct MenuSectionView {
    pub category: String,
    pub items: Vec<MenuItemView>,
}

#[derive(Template)]
#[template(path = "canteen/menu.txt")]
pub struct MenuTemplate {
    pub balance: String,
    pub sections: Vec<MenuSectionView>,
}

impl MenuTemplate {
    #[must_use]
    pub fn new(menu: &Menu, balance: Rupees) -> Self {
        let sections = menu
            .categories()
            .into_iter()
            .map(|category| MenuSectionView {
                category: capitalize(category),
                items: menu
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .map(MenuItemView::from)
                    .collect(),
            })
            .collect();

        Self {
            balance: balance.to_string(),
            sections,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone)]
pub struct CartLineView {
    pub name: String,
    pub qty: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            qty: line.qty.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart preview shown before an order is submitted.
#[derive(Template)]
#[template(path = "canteen/cart.txt")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub shortfall: Option<String>,
}

impl CartTemplate {
    #[must_use]
    pub fn new(cart: &Cart, balance: Rupees) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            shortfall: shortfall(cart.total(), balance).map(|r| r.to_string()),
        }
    }
}

// =============================================================================
// Bill
// =============================================================================

#[derive(Debug, Clone)]
pub struct BillLineView {
    pub item: String,
    pub qty: String,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&BillItem> for BillLineView {
    fn from(item: &BillItem) -> Self {
        Self {
            item: format!("{} {}", item.emoji, item.name),
            qty: item.qty.to_string(),
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "canteen/bill.txt")]
pub struct BillTemplate {
    pub vendor: String,
    pub order_id: String,
    pub date: String,
    pub lines: Vec<BillLineView>,
    pub total: String,
    pub payment_method: String,
    pub txn_id: String,
}

impl From<&Bill> for BillTemplate {
    fn from(bill: &Bill) -> Self {
        Self {
            vendor: bill.vendor.clone(),
            order_id: bill.order_id.to_string(),
            date: format_time(&bill.timestamp),
            lines: bill.items.iter().map(BillLineView::from).collect(),
            total: bill.total.to_string(),
            payment_method: bill.payment_method.clone(),
            txn_id: bill.txn_id.clone(),
        }
    }
}

// =============================================================================
// Order history
// =============================================================================

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub time: String,
    pub items: String,
    pub total: String,
    pub status: String,
}

impl From<&OrderSummary> for OrderView {
    fn from(order: &OrderSummary) -> Self {
        let items = order
            .items
            .iter()
            .map(|i| {
                if i.qty > 1 {
                    format!("{} {} ×{}", i.emoji, i.name, i.qty)
                } else {
                    format!("{} {}", i.emoji, i.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: order.id.to_string(),
            time: format_time(&order.time),
            items,
            total: order.total.to_string(),
            status: order.status.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "canteen/orders.txt")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
}

impl From<&OrderHistory> for OrdersTemplate {
    fn from(history: &OrderHistory) -> Self {
        Self {
            orders: history.orders.iter().map(OrderView::from).collect(),
        }
    }
}
