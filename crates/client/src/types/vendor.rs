//! Vendor registration, payments and orders.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{OrderId, Rupees, SpendingCategory, UserId};

/// Body of `POST /vendor/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorRegistration {
    pub name: String,
    pub category: SpendingCategory,
}

/// Response of `POST /vendor/register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredVendor {
    #[serde(default)]
    pub message: String,
    pub name: String,
    pub category: SpendingCategory,
}

/// Response of `GET /vendor/qr`: payment QR payload for a registered vendor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VendorQr {
    /// JSON-encoded payload a student wallet would scan.
    pub qr_data: String,
    pub display: QrDisplay,
}

/// Human-readable part of the QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QrDisplay {
    pub vendor: String,
    pub category: String,
}

/// Body of `POST /vendor/pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VendorPayment {
    pub student_id: UserId,
    pub amount: Rupees,
    pub category: SpendingCategory,
}

/// Response of `POST /vendor/pay`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub txn_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Rupees>,
    #[serde(default)]
    pub category: Option<SpendingCategory>,
}

/// An order paid to the calling vendor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VendorOrder {
    pub id: OrderId,
    #[serde(default)]
    pub student_id: Option<UserId>,
    pub total: Rupees,
    #[serde(default)]
    pub txn_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub time: String,
}

/// Response of `GET /vendor/orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VendorOrders {
    #[serde(default)]
    pub orders: Vec<VendorOrder>,
}
