//! Disbursement endpoints.

use loantrack_core::{DisbursementId, DisbursementStatus, LoanId};
use tracing::instrument;

use super::{ApiClient, wire_value};
use crate::error::ApiError;
use crate::models::Disbursement;

/// Filters for the disbursement list.
#[derive(Debug, Clone, Default)]
pub struct DisbursementFilter {
    /// Pagination offset.
    pub skip: Option<u32>,
    /// Page size (backend caps at 100).
    pub limit: Option<u32>,
    /// Restrict to one loan.
    pub loan_id: Option<LoanId>,
    /// Restrict to one workflow status.
    pub status: Option<DisbursementStatus>,
}

impl DisbursementFilter {
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
        if let Some(status) = self.status {
            query.push(("status", wire_value(&status)));
        }
        query
    }
}

impl ApiClient {
    /// List disbursements with pagination and filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn list_disbursements(
        &self,
        filter: &DisbursementFilter,
    ) -> Result<Vec<Disbursement>, ApiError> {
        self.get("/disbursements", &filter.to_query()).await
    }

    /// Fetch one disbursement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the disbursement doesn't exist.
    #[instrument(skip(self), fields(disbursement_id = %disbursement_id))]
    pub async fn get_disbursement(
        &self,
        disbursement_id: DisbursementId,
    ) -> Result<Disbursement, ApiError> {
        self.get(&format!("/disbursements/{disbursement_id}"), &[])
            .await
    }

    /// Approve a requested disbursement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown disbursement, or
    /// [`ApiError::Forbidden`] when the user's role can't approve.
    #[instrument(skip(self), fields(disbursement_id = %disbursement_id))]
    pub async fn approve_disbursement(
        &self,
        disbursement_id: DisbursementId,
    ) -> Result<(), ApiError> {
        self.put_action(&format!("/disbursements/{disbursement_id}/approve"))
            .await
    }

    /// Release the funds for an approved disbursement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown disbursement, or
    /// [`ApiError::Forbidden`] when the user's role can't release funds.
    #[instrument(skip(self), fields(disbursement_id = %disbursement_id))]
    pub async fn release_disbursement(
        &self,
        disbursement_id: DisbursementId,
    ) -> Result<(), ApiError> {
        self.put_action(&format!("/disbursements/{disbursement_id}/disburse"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_to_query() {
        let filter = DisbursementFilter {
            loan_id: Some(LoanId::new(42)),
            status: Some(DisbursementStatus::Requested),
            ..DisbursementFilter::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("loan_id", "42".to_string()),
                ("status", "DEMANDE".to_string()),
            ]
        );
    }
}
