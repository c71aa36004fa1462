//! Command handlers.
//!
//! Each handler checks the session, calls the API and returns the rendered
//! screen. Printing is left to the binary so handlers can be tested against
//! a stub API.

pub mod admin;
pub mod auth;
pub mod canteen;
pub mod parent;
pub mod student;
pub mod vendor;

use campus_wallet_core::Rupees;

use crate::error::CliError;

/// Reject zero and negative amounts before they reach the API.
fn positive_amount(amount: Rupees) -> Result<Rupees, CliError> {
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(CliError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ))
    }
}

/// Join an action's confirmation with the refreshed screen.
fn with_refresh(message: &str, screen: &str) -> String {
    format!("{message}\n\n{screen}")
}
