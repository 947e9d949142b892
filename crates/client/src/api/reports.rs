//! Reporting endpoints.

use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::DashboardStats;

impl ApiClient {
    /// Headline figures for the dashboard screen.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/reports/dashboard", &[]).await
    }
}
