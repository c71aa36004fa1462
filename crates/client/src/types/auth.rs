//! Registration, login and account linking.

use serde::{Deserialize, Serialize};

use campus_wallet_core::{Role, UserId};

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Only meaningful for parents; omitted from the body when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_student_id: Option<UserId>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("linked_student_id", &self.linked_student_id)
            .finish()
    }
}

/// Response of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: UserId,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /auth/login`.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    token: String,
    pub user_id: UserId,
    pub role: Role,
}

impl LoginResponse {
    /// The bearer token issued by the API.
    #[must_use]
    pub fn token_str(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `POST /auth/link-student`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkStudentRequest {
    pub parent_id: UserId,
    pub student_id: UserId,
}
