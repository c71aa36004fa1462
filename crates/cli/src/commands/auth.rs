//! Login, registration and session commands.

use askama::Template;
use tracing::{info, instrument, warn};

use campus_wallet_client::{LoginRequest, RegisterRequest};
use campus_wallet_core::{Role, UserId};

use crate::app::App;
use crate::error::CliError;
use crate::views::auth::SessionTemplate;

/// Create an account. Admin accounts cannot be self-registered, and only
/// parents may name a student to link.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for disallowed role/link combinations, or
/// the API's message (for example a taken username).
#[instrument(skip(app, password))]
pub async fn register(
    app: &App,
    username: &str,
    password: &str,
    role: Role,
    linked_student: Option<UserId>,
) -> Result<String, CliError> {
    if !role.is_self_registrable() {
        return Err(CliError::InvalidInput(format!(
            "{} accounts cannot be created through registration",
            role.label()
        )));
    }
    if linked_student.is_some() && role != Role::Parent {
        return Err(CliError::InvalidInput(
            "Only parent accounts can link a student at registration".to_string(),
        ));
    }

    let request = RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        role,
        linked_student_id: linked_student,
    };
    let response = app.client().register(&request).await?;
    info!(user_id = %response.user_id, "Registered account");

    Ok(format!(
        "Registered! User ID: {}. You can now login.",
        response.user_id
    ))
}

/// Log in and store the session.
///
/// # Errors
///
/// Returns the API's message for bad credentials; the session is left
/// untouched in that case.
#[instrument(skip(app, password))]
pub async fn login(app: &App, username: &str, password: &str) -> Result<String, CliError> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let user = app.client().login(&request).await?;
    Ok(SessionTemplate::new("Logged in", &user).render()?)
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns error if the session file cannot be removed.
#[instrument(skip(app))]
pub fn logout(app: &App) -> Result<String, CliError> {
    app.session().clear()?;
    info!("Logged out");
    Ok("Logged out.".to_string())
}

/// Show the stored identity. An unreadable identity reads as logged out.
///
/// # Errors
///
/// Returns error if the session screen fails to render.
pub fn whoami(app: &App) -> Result<String, CliError> {
    let user = app.session().read_user().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable session user");
        None
    });
    match user {
        Some(user) if app.session().read_token().is_some() => {
            Ok(SessionTemplate::new("Logged in", &user).render()?)
        }
        _ => Ok("Not logged in.".to_string()),
    }
}
