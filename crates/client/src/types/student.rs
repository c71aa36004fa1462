//! Student dashboard.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{CategoryBreakdown, Rupees, UserId};

/// Response of `GET /student/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentSummary {
    pub user_id: UserId,
    pub username: String,
    pub month: String,
    #[serde(default)]
    pub total_spent: Rupees,
    #[serde(default)]
    pub balance: Rupees,
    #[serde(default)]
    pub breakdown: CategoryBreakdown,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

/// A payment the student made. Only the student sees these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Rupees,
    pub category: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub time: String,
}

/// Response of `GET /student/balance` and `GET /vendor/balance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Balance {
    pub balance: Rupees,
    #[serde(default)]
    pub address: Option<String>,
}
