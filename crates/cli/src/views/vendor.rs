//! Vendor dashboard.

use askama::Template;

use campus_wallet_client::{VendorOrder, VendorOrders, VendorQr};
use campus_wallet_core::{Rupees, SpendingCategory};

use super::format_time;

/// Dashboard for a vendor that has not registered a shop yet.
#[derive(Template)]
#[template(path = "vendor/register.txt")]
pub struct VendorRegisterTemplate {
    pub categories: Vec<String>,
}

impl Default for VendorRegisterTemplate {
    fn default() -> Self {
        Self {
            categories: SpendingCategory::ALL
                .iter()
                .map(|c| format!("{} ({})", c.label(), c.as_str()))
                .collect(),
        }
    }
}

/// Dashboard for a registered vendor.
#[derive(Template)]
#[template(path = "vendor/dashboard.txt")]
pub struct VendorDashboardTemplate {
    pub name: String,
    pub category: String,
    pub balance: String,
    pub qr_data: String,
}

impl VendorDashboardTemplate {
    /// `balance` is `None` when it could not be loaded.
    #[must_use]
    pub fn new(qr: &VendorQr, balance: Option<Rupees>) -> Self {
        Self {
            name: qr.display.vendor.clone(),
            category: qr.display.category.clone(),
            balance: balance.map_or_else(|| "unavailable".to_string(), |b| b.to_string()),
            qr_data: qr.qr_data.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VendorOrderView {
    pub id: String,
    pub student: String,
    pub total: String,
    pub status: String,
    pub time: String,
}

impl From<&VendorOrder> for VendorOrderView {
    fn from(order: &VendorOrder) -> Self {
        Self {
            id: order.id.to_string(),
            student: order
                .student_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            total: order.total.to_string(),
            status: order.status.clone(),
            time: format_time(&order.time),
        }
    }
}

#[derive(Template)]
#[template(path = "vendor/orders.txt")]
pub struct VendorOrdersTemplate {
    pub orders: Vec<VendorOrderView>,
}

impl From<&VendorOrders> for VendorOrdersTemplate {
    fn from(orders: &VendorOrders) -> Self {
        Self {
            orders: orders.orders.iter().map(VendorOrderView::from).collect(),
        }
    }
}
