//! `/parent` endpoints.

use tracing::instrument;

use campus_wallet_core::{Rupees, UserId};

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{FundReceipt, FundRequest, LinkedStudents, SpendingReport};

impl ApiClient {
    /// Students linked to the calling parent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-parent callers.
    #[instrument(skip(self))]
    pub async fn parent_students(&self) -> Result<LinkedStudents, ApiError> {
        self.get("/parent/students").await
    }

    /// Category spending for one linked student in a `YYYY-MM` month.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` if the student is not linked to the caller.
    #[instrument(skip(self))]
    pub async fn parent_spending(
        &self,
        student_id: UserId,
        month: &str,
    ) -> Result<SpendingReport, ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("student_id", &student_id.to_string())
            .append_pair("month", month)
            .finish();
        self.get(&format!("/parent/spending?{query}")).await
    }

    /// Send money to a linked student's wallet.
    ///
    /// Not idempotent: calling twice sends twice.
    ///
    /// # Errors
    ///
    /// Returns the API's message for unlinked students or insufficient funds.
    #[instrument(skip(self))]
    pub async fn parent_fund(
        &self,
        student_id: UserId,
        amount: Rupees,
    ) -> Result<FundReceipt, ApiError> {
        self.post("/parent/fund", &FundRequest { student_id, amount })
            .await
    }
}
