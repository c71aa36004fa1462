//! Platform-wide statistics.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{CategoryBreakdown, Rupees};

/// Response of `GET /admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub users: UserCounts,
    pub financials: Financials,
    #[serde(default)]
    pub spending_by_category: CategoryBreakdown,
}

/// Registered accounts per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCounts {
    #[serde(default)]
    pub students: i64,
    #[serde(default)]
    pub parents: i64,
    #[serde(default)]
    pub vendors: i64,
}

/// Money moved through the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    #[serde(default)]
    pub total_funded: Rupees,
    #[serde(default)]
    pub total_spent: Rupees,
    #[serde(default)]
    pub total_transactions: i64,
}
