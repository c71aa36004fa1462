//! Student dashboard.

use askama::Template;

use campus_wallet_client::{StudentSummary, Transaction};

use super::{SpendingBarView, format_time, spending_bars};

/// A recent transaction row.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub vendor: String,
    pub category: String,
    pub amount: String,
    pub time: String,
}

impl From<&Transaction> for TransactionView {
    fn from(txn: &Transaction) -> Self {
        Self {
            vendor: if txn.vendor.is_empty() {
                "Unknown vendor".to_string()
            } else {
                txn.vendor.clone()
            },
            category: txn.category.clone(),
            amount: txn.amount.to_string(),
            time: format_time(&txn.time),
        }
    }
}

#[derive(Template)]
#[template(path = "student/dashboard.txt")]
pub struct StudentDashboardTemplate {
    pub username: String,
    pub student_id: String,
    pub month: String,
    pub balance: String,
    pub spent: String,
    pub bars: Vec<SpendingBarView>,
    pub transactions: Vec<TransactionView>,
}

impl From<&StudentSummary> for StudentDashboardTemplate {
    fn from(summary: &StudentSummary) -> Self {
        Self {
            username: summary.username.clone(),
            student_id: summary.user_id.to_string(),
            month: summary.month.clone(),
            balance: summary.balance.to_string(),
            spent: summary.total_spent.to_string(),
            bars: spending_bars(&summary.breakdown),
            transactions: summary
                .recent_transactions
                .iter()
                .map(TransactionView::from)
                .collect(),
        }
    }
}
