//! Login, registration and session views.

use askama::Template;

use campus_wallet_client::UserIdentity;
use campus_wallet_core::Role;

/// Shell command that opens the dashboard for a role.
#[must_use]
pub const fn dashboard_command(role: Role) -> &'static str {
    match role {
        Role::Student => "campus-wallet student",
        Role::Parent => "campus-wallet parent show",
        Role::Vendor => "campus-wallet vendor show",
        Role::Admin => "campus-wallet admin",
    }
}

/// Shown after a successful login and by `whoami`.
#[derive(Template)]
#[template(path = "auth/session.txt")]
pub struct SessionTemplate {
    pub heading: String,
    pub user_id: String,
    pub role: String,
    pub dashboard: String,
}

impl SessionTemplate {
    #[must_use]
    pub fn new(heading: &str, user: &UserIdentity) -> Self {
        Self {
            heading: heading.to_string(),
            user_id: user.id.to_string(),
            role: user.role.label().to_string(),
            dashboard: dashboard_command(user.role).to_string(),
        }
    }
}
