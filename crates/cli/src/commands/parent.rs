//! Parent commands: dashboard, funding and linking.

use askama::Template;
use chrono::NaiveDate;
use tracing::{info, instrument};

use campus_wallet_core::{Role, Rupees, UserId};

use super::{positive_amount, with_refresh};
use crate::app::App;
use crate::error::CliError;
use crate::views::parent::ParentDashboardTemplate;

/// Current month as `YYYY-MM`, in local time.
#[must_use]
pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

/// Check a `YYYY-MM` month.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` if `month` is not a valid month.
pub fn parse_month(month: &str) -> Result<String, CliError> {
    let month = month.trim();
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidInput(format!("Invalid month (expected YYYY-MM): {month}")))?;
    Ok(month.to_string())
}

/// Linked students and the selected student's spending.
///
/// Without `student`, the first linked student is selected. Without
/// `month`, the current month is shown.
///
/// # Errors
///
/// Returns error if the session is not a parent's or an API call fails.
#[instrument(skip(app))]
pub async fn dashboard(
    app: &App,
    student: Option<UserId>,
    month: Option<&str>,
) -> Result<String, CliError> {
    app.require_role(Role::Parent)?;
    let month = month.map_or_else(|| Ok(current_month()), parse_month)?;

    let linked = app.authorized(app.client().parent_students().await)?;
    let selected = student.or_else(|| linked.students.first().map(|s| s.id));

    let spending = match selected {
        Some(id) => Some(app.authorized(app.client().parent_spending(id, &month).await)?),
        None => None,
    };

    Ok(ParentDashboardTemplate::new(&linked.students, selected, spending.as_ref()).render()?)
}

/// Send money to a linked student, then show their refreshed spending.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for non-positive amounts, otherwise the
/// API's message (for example an unlinked student).
#[instrument(skip(app))]
pub async fn fund(app: &App, student: UserId, amount: Rupees) -> Result<String, CliError> {
    app.require_role(Role::Parent)?;
    let amount = positive_amount(amount)?;

    let receipt = app.authorized(app.client().parent_fund(student, amount).await)?;
    info!(student_id = %student, amount = %amount, "Funded student");

    let message = if receipt.message.is_empty() {
        format!("Sent {amount} to student {student}.")
    } else {
        receipt.message
    };
    let screen = dashboard(app, Some(student), None).await?;
    Ok(with_refresh(&message, &screen))
}

/// Link a student to the logged-in parent, then show the refreshed dashboard.
///
/// # Errors
///
/// Returns error if the session is not a parent's or the API rejects the link.
#[instrument(skip(app))]
pub async fn link(app: &App, student: UserId) -> Result<String, CliError> {
    let parent = app.require_role(Role::Parent)?;
    app.authorized(app.client().link_student(parent.id, student).await)?;
    info!(student_id = %student, "Linked student");

    let screen = dashboard(app, Some(student), None).await?;
    Ok(with_refresh("Student linked successfully!", &screen))
}
