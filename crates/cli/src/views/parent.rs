//! Parent dashboard.

use askama::Template;

use campus_wallet_client::{LinkedStudent, SpendingReport};
use campus_wallet_core::UserId;

use super::{SpendingBarView, spending_bars};

#[derive(Debug, Clone)]
pub struct LinkedStudentView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Aggregated spending for the selected student.
#[derive(Debug, Clone)]
pub struct SpendingView {
    pub student_name: String,
    pub month: String,
    pub balance: String,
    pub funded: String,
    pub spent: String,
    pub bars: Vec<SpendingBarView>,
}

impl From<&SpendingReport> for SpendingView {
    fn from(report: &SpendingReport) -> Self {
        Self {
            student_name: report.student_name.clone(),
            month: report.month.clone(),
            balance: report.balance.to_string(),
            funded: report.total_funded.to_string(),
            spent: report.total_spent.to_string(),
            bars: spending_bars(&report.breakdown),
        }
    }
}

#[derive(Template)]
#[template(path = "parent/dashboard.txt")]
pub struct ParentDashboardTemplate {
    pub students: Vec<LinkedStudentView>,
    pub spending: Option<SpendingView>,
}

impl ParentDashboardTemplate {
    #[must_use]
    pub fn new(
        students: &[LinkedStudent],
        selected: Option<UserId>,
        spending: Option<&SpendingReport>,
    ) -> Self {
        Self {
            students: students
                .iter()
                .map(|s| LinkedStudentView {
                    id: s.id.to_string(),
                    name: s.name.clone(),
                    selected: Some(s.id) == selected,
                })
                .collect(),
            spending: spending.map(SpendingView::from),
        }
    }
}
