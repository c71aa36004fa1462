//! Admin dashboard.

use askama::Template;

use campus_wallet_client::AdminStats;

use super::{SpendingBarView, spending_bars};

#[derive(Template)]
#[template(path = "admin/dashboard.txt")]
pub struct AdminDashboardTemplate {
    pub students: String,
    pub parents: String,
    pub vendors: String,
    pub total_funded: String,
    pub total_spent: String,
    pub transactions: String,
    pub bars: Vec<SpendingBarView>,
}

impl From<&AdminStats> for AdminDashboardTemplate {
    fn from(stats: &AdminStats) -> Self {
        Self {
            students: stats.users.students.to_string(),
            parents: stats.users.parents.to_string(),
            vendors: stats.users.vendors.to_string(),
            total_funded: stats.financials.total_funded.to_string(),
            total_spent: stats.financials.total_spent.to_string(),
            transactions: stats.financials.total_transactions.to_string(),
            bars: spending_bars(&stats.spending_by_category),
        }
    }
}
