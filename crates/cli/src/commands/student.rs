//! Student dashboard command.

use askama::Template;
use tracing::instrument;

use campus_wallet_core::Role;

use crate::app::App;
use crate::error::CliError;
use crate::views::student::StudentDashboardTemplate;

/// Profile, balance, this month's spending and recent transactions.
///
/// # Errors
///
/// Returns error if the session is not a student's or the API call fails.
#[instrument(skip(app))]
pub async fn dashboard(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Student)?;
    let summary = app.authorized(app.client().student_summary().await)?;
    Ok(StudentDashboardTemplate::from(&summary).render()?)
}
