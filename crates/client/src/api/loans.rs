//! Loan endpoints.

use loantrack_core::{ClientId, LoanId, LoanStatus};
use tracing::instrument;

use super::{ApiClient, wire_value};
use crate::error::ApiError;
use crate::models::{Loan, LoanWithDetails};

/// Filters for the loan list.
#[derive(Debug, Clone, Default)]
pub struct LoanFilter {
    /// Pagination offset.
    pub skip: Option<u32>,
    /// Page size (backend caps at 100).
    pub limit: Option<u32>,
    /// Restrict to one lifecycle status.
    pub status: Option<LoanStatus>,
    /// Restrict to one borrower.
    pub client_id: Option<ClientId>,
}

impl LoanFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", wire_value(&status)));
        }
        if let Some(client_id) = self.client_id {
            query.push(("client_id", client_id.to_string()));
        }
        query
    }
}

impl ApiClient {
    /// List loans with pagination and filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn list_loans(&self, filter: &LoanFilter) -> Result<Vec<Loan>, ApiError> {
        self.get("/loans", &filter.to_query()).await
    }

    /// Fetch one loan with its borrower, disbursements, and alerts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the loan doesn't exist.
    #[instrument(skip(self), fields(loan_id = %loan_id))]
    pub async fn get_loan(&self, loan_id: LoanId) -> Result<LoanWithDetails, ApiError> {
        self.get(&format!("/loans/{loan_id}"), &[]).await
    }
}
