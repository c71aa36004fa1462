//! Vendor commands: dashboard, registration, payments and orders.

use askama::Template;
use tracing::{info, instrument, warn};

use campus_wallet_core::{Role, Rupees, SpendingCategory, UserId};

use super::{positive_amount, with_refresh};
use crate::app::App;
use crate::error::CliError;
use crate::views::vendor::{VendorDashboardTemplate, VendorOrdersTemplate, VendorRegisterTemplate};

/// Registration prompt for new vendors, balance and QR for registered ones.
///
/// # Errors
///
/// Returns error if the session is not a vendor's or the API is unreachable.
#[instrument(skip(app))]
pub async fn dashboard(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Vendor)?;

    let Some(qr) = app.authorized(app.client().registered_vendor_qr().await)? else {
        return Ok(VendorRegisterTemplate::default().render()?);
    };

    let balance = match app.authorized(app.client().vendor_balance().await) {
        Ok(balance) => Some(balance.balance),
        Err(CliError::SessionExpired) => return Err(CliError::SessionExpired),
        Err(e) => {
            warn!(error = %e, "Failed to load vendor balance");
            None
        }
    };

    Ok(VendorDashboardTemplate::new(&qr, balance).render()?)
}

/// Register the vendor's shop, then show the dashboard.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for a blank name, otherwise the API's
/// message (for example an already registered vendor).
#[instrument(skip(app))]
pub async fn register(
    app: &App,
    name: &str,
    category: SpendingCategory,
) -> Result<String, CliError> {
    app.require_role(Role::Vendor)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput(
            "Vendor name cannot be empty".to_string(),
        ));
    }

    app.authorized(app.client().register_vendor(name, category).await)?;
    info!(name, category = %category, "Registered vendor");

    let screen = dashboard(app).await?;
    Ok(with_refresh("Vendor registered successfully!", &screen))
}

/// Charge a student, then show the refreshed balance.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for non-positive amounts, otherwise the
/// API's message (for example insufficient student balance).
#[instrument(skip(app))]
pub async fn pay(
    app: &App,
    student: UserId,
    amount: Rupees,
    category: SpendingCategory,
) -> Result<String, CliError> {
    app.require_role(Role::Vendor)?;
    let amount = positive_amount(amount)?;

    app.authorized(app.client().vendor_pay(student, amount, category).await)?;
    info!(student_id = %student, amount = %amount, category = %category, "Payment received");

    let screen = dashboard(app).await?;
    Ok(with_refresh(
        &format!("Payment of {amount} received ({category})"),
        &screen,
    ))
}

/// Orders paid to this vendor.
///
/// # Errors
///
/// Returns error if the session is not a vendor's or the API call fails.
#[instrument(skip(app))]
pub async fn orders(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Vendor)?;
    let orders = app.authorized(app.client().vendor_orders().await)?;
    Ok(VendorOrdersTemplate::from(&orders).render()?)
}
