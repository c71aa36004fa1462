//! `/student` endpoints.

use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{Balance, StudentSummary};

impl ApiClient {
    /// Balance, month-to-date spending and recent transactions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-student callers.
    #[instrument(skip(self))]
    pub async fn student_summary(&self) -> Result<StudentSummary, ApiError> {
        self.get("/student/summary").await
    }

    /// Current wallet balance.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-student callers.
    #[instrument(skip(self))]
    pub async fn student_balance(&self) -> Result<Balance, ApiError> {
        self.get("/student/balance").await
    }
}
