//! `/admin` endpoints.

use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::AdminStats;

impl ApiClient {
    /// Platform-wide user counts, money totals and category spending.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-admin callers.
    #[instrument(skip(self))]
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get("/admin/stats").await
    }
}
