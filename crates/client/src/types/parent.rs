//! Parent dashboard: linked students, spending, funding.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{CategoryBreakdown, Rupees, UserId};

/// A student linked to the calling parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedStudent {
    pub id: UserId,
    pub name: String,
}

/// Response of `GET /parent/students`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkedStudents {
    #[serde(default)]
    pub students: Vec<LinkedStudent>,
}

/// Response of `GET /parent/spending`.
///
/// Parents only ever get category totals; individual transactions, vendor
/// names and timestamps are not part of this payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpendingReport {
    pub student_name: String,
    pub month: String,
    #[serde(default)]
    pub total_funded: Rupees,
    #[serde(default)]
    pub total_spent: Rupees,
    #[serde(default)]
    pub balance: Rupees,
    #[serde(default)]
    pub breakdown: CategoryBreakdown,
}

/// Body of `POST /parent/fund`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FundRequest {
    pub student_id: UserId,
    pub amount: Rupees,
}

/// Response of `POST /parent/fund`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FundReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tokens_sent: Option<Rupees>,
    #[serde(default)]
    pub txn_id: Option<String>,
}
