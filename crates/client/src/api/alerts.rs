//! Alert endpoints.

use loantrack_core::{AlertId, AlertSeverity, AlertStatus, AlertType, LoanId};
use tracing::instrument;

use super::{ApiClient, wire_value};
use crate::error::ApiError;
use crate::models::{Alert, AlertsSummary};

/// Filters for the alert list.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    /// Pagination offset.
    pub skip: Option<u32>,
    /// Page size (backend caps at 100).
    pub limit: Option<u32>,
    /// Restrict to one loan.
    pub loan_id: Option<LoanId>,
    /// Restrict to one severity.
    pub severity: Option<AlertSeverity>,
    /// Restrict to one workflow status.
    pub status: Option<AlertStatus>,
    /// Restrict to one alert category.
    pub alert_type: Option<AlertType>,
}

impl AlertFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(loan_id) = self.loan_id {
            query.push(("loan_id", loan_id.to_string()));
        }
        if let Some(severity) = self.severity {
            query.push(("severity", wire_value(&severity)));
        }
        if let Some(status) = self.status {
            query.push(("status", wire_value(&status)));
        }
        if let Some(alert_type) = self.alert_type {
            query.push(("alert_type", wire_value(&alert_type)));
        }
        query
    }
}

impl ApiClient {
    /// List alerts with pagination and filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>, ApiError> {
        self.get("/alerts", &filter.to_query()).await
    }

    /// Mark an alert as seen by a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the alert doesn't exist.
    #[instrument(skip(self), fields(alert_id = %alert_id))]
    pub async fn acknowledge_alert(&self, alert_id: AlertId) -> Result<(), ApiError> {
        self.put_action(&format!("/alerts/{alert_id}/acknowledge"))
            .await
    }

    /// Mark an alert as dealt with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the alert doesn't exist.
    #[instrument(skip(self), fields(alert_id = %alert_id))]
    pub async fn resolve_alert(&self, alert_id: AlertId) -> Result<(), ApiError> {
        self.put_action(&format!("/alerts/{alert_id}/resolve")).await
    }

    /// Aggregated alert counts for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn alerts_summary(&self) -> Result<AlertsSummary, ApiError> {
        self.get("/alerts/summary/dashboard", &[]).await
    }
}
