//! Admin dashboard command.

use askama::Template;
use tracing::instrument;

use campus_wallet_core::Role;

use crate::app::App;
use crate::error::CliError;
use crate::views::admin::AdminDashboardTemplate;

/// Platform-wide counts, totals and spending by category.
///
/// # Errors
///
/// Returns error if the session is not an admin's or the API call fails.
#[instrument(skip(app))]
pub async fn dashboard(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Admin)?;
    let stats = app.authorized(app.client().admin_stats().await)?;
    Ok(AdminDashboardTemplate::from(&stats).render()?)
}
