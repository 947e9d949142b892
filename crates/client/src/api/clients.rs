//! Client (borrower) endpoints.

use loantrack_core::ClientId;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Client, ClientWithLoans};

/// Filters for the client list.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Pagination offset.
    pub skip: Option<u32>,
    /// Page size (backend caps at 100).
    pub limit: Option<u32>,
    /// Substring match on the client's name.
    pub search: Option<String>,
    /// Restrict to active or inactive clients.
    pub is_active: Option<bool>,
}

impl ClientFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(is_active) = self.is_active {
            query.push(("is_active", is_active.to_string()));
        }
        query
    }
}

impl ApiClient {
    /// List clients with pagination and filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or any
    /// transport/decoding error.
    #[instrument(skip(self))]
    pub async fn list_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>, ApiError> {
        self.get("/clients", &filter.to_query()).await
    }

    /// Fetch one client with their loans.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the client doesn't exist.
    #[instrument(skip(self), fields(client_id = %client_id))]
    pub async fn get_client(&self, client_id: ClientId) -> Result<ClientWithLoans, ApiError> {
        self.get(&format!("/clients/{client_id}"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_to_query() {
        let filter = ClientFilter {
            skip: Some(20),
            limit: Some(10),
            search: Some("diallo".to_string()),
            is_active: Some(true),
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("skip", "20".to_string()),
                ("limit", "10".to_string()),
                ("search", "diallo".to_string()),
                ("is_active", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter_yields_no_params() {
        assert!(ClientFilter::default().to_query().is_empty());
    }
}
