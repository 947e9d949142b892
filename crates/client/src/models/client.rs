//! Client (borrower) resource models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loantrack_core::{ClientId, Email};

use super::loan::Loan;

/// A borrower as returned by `/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Database ID.
    pub id: ClientId,
    /// Bank-assigned client number.
    pub client_number: String,
    /// Full name.
    pub name: String,
    /// Company name for corporate borrowers.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// Email address, if on file.
    #[serde(default)]
    pub email: Option<Email>,
    /// National ID card number, if on file.
    #[serde(default)]
    pub id_card_number: Option<String>,
    /// Whether the client relationship is active.
    pub is_active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A client with their loans, as returned by `/clients/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientWithLoans {
    /// The client record.
    #[serde(flatten)]
    pub client: Client,
    /// Loans held by this client.
    #[serde(default)]
    pub loans: Vec<Loan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_backend_json() {
        let json = r#"{
            "id": 12,
            "client_number": "CL-2024-0012",
            "name": "Mariam Diallo",
            "address": "Rue 14, Quartier Nord",
            "phone": "+226 70 00 00 00",
            "email": "m.diallo@example.com",
            "is_active": true,
            "created_at": "2024-03-01T09:30:00Z"
        }"#;
        let client: Client = serde_json::from_str(json).expect("deserialize");
        assert_eq!(client.id, ClientId::new(12));
        assert_eq!(client.client_number, "CL-2024-0012");
        assert!(client.company_name.is_none());
        assert!(client.updated_at.is_none());
    }

    #[test]
    fn test_client_with_loans_flattened() {
        let json = r#"{
            "id": 12,
            "client_number": "CL-2024-0012",
            "name": "Mariam Diallo",
            "address": "Rue 14",
            "phone": "+226 70 00 00 00",
            "is_active": true,
            "created_at": "2024-03-01T09:30:00Z",
            "loans": []
        }"#;
        let detail: ClientWithLoans = serde_json::from_str(json).expect("deserialize");
        assert_eq!(detail.client.name, "Mariam Diallo");
        assert!(detail.loans.is_empty());
    }
}
