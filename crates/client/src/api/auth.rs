//! `/auth` endpoints.

use tracing::instrument;

use campus_wallet_core::UserId;

use super::ApiClient;
use crate::error::ApiError;
use crate::session::UserIdentity;
use crate::types::{
    LinkStudentRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse,
};

impl ApiClient {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns the API's message for duplicate usernames or bad roles.
    #[instrument(skip(self, request), fields(username = %request.username, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post("/auth/register", request).await
    }

    /// Exchange credentials for a token and record it in the session.
    ///
    /// The token and `{id, role}` are both stored before this returns, so the
    /// next call on any clone of this client is authenticated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` for bad credentials (nothing is stored) or
    /// `ApiError::Session` if the session could not be written.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<UserIdentity, ApiError> {
        let response: LoginResponse = self.post("/auth/login", request).await?;
        let identity = self.session().save_login(&response)?;
        tracing::info!(user_id = %identity.id, role = %identity.role, "Logged in");
        Ok(identity)
    }

    /// Link an existing student account to a parent.
    ///
    /// # Errors
    ///
    /// Returns the API's message if either account does not exist.
    #[instrument(skip(self))]
    pub async fn link_student(
        &self,
        parent_id: UserId,
        student_id: UserId,
    ) -> Result<MessageResponse, ApiError> {
        let body = LinkStudentRequest {
            parent_id,
            student_id,
        };
        self.post("/auth/link-student", &body).await
    }
}
