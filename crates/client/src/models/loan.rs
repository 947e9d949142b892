//! Loan resource models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loantrack_core::{ClientId, LoanId, LoanStatus, LoanType};

use super::alert::Alert;
use super::client::Client;
use super::disbursement::Disbursement;

/// A loan as returned by `/loans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Database ID.
    pub id: LoanId,
    /// Bank-assigned loan number.
    pub loan_number: String,
    /// The borrower's ID.
    pub client_id: ClientId,
    /// Product type.
    pub loan_type: LoanType,
    /// Lifecycle status.
    pub status: LoanStatus,
    /// Principal amount.
    pub amount: Decimal,
    /// Repayment duration in months.
    pub duration_months: i32,
    /// Grace period before the first repayment, in months.
    pub grace_period_months: i32,
    /// Annual interest rate (percent).
    pub interest_rate: Decimal,
    /// Monthly repayment amount.
    pub monthly_payment: Decimal,
    /// When the loan was approved.
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    /// When the contract was signed.
    #[serde(default)]
    pub signature_date: Option<NaiveDate>,
    /// First repayment due date.
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
    /// Date the approval lapses if undisbursed.
    #[serde(default)]
    pub validity_end_date: Option<NaiveDate>,
    /// Mortgage registered against the property, if any.
    #[serde(default)]
    pub mortgage_amount: Option<Decimal>,
    /// Property title number for mortgaged loans.
    #[serde(default)]
    pub property_title_number: Option<String>,
    /// Location of the financed property.
    #[serde(default)]
    pub property_location: Option<String>,
    /// Life insurance underwriter.
    #[serde(default)]
    pub life_insurance_company: Option<String>,
    /// Fire insurance underwriter.
    #[serde(default)]
    pub fire_insurance_company: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A loan with its borrower, disbursements, and alerts, as returned by
/// `/loans/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanWithDetails {
    /// The loan record.
    #[serde(flatten)]
    pub loan: Loan,
    /// The borrower, when embedded.
    #[serde(default)]
    pub client: Option<Client>,
    /// Disbursement tranches for this loan.
    #[serde(default)]
    pub disbursements: Vec<Disbursement>,
    /// Open and historical alerts for this loan.
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_json() -> &'static str {
        r#"{
            "id": 42,
            "loan_number": "PR-2024-0042",
            "client_id": 12,
            "loan_type": "PRET_CLASSIQUE_CONSTRUCTEUR",
            "status": "DEBLOCAGE",
            "amount": "15000000.00",
            "duration_months": 180,
            "grace_period_months": 12,
            "interest_rate": "6.50",
            "monthly_payment": "130000.00",
            "approval_date": "2024-02-15",
            "validity_end_date": "2026-02-15",
            "created_at": "2024-02-01T08:00:00Z"
        }"#
    }

    #[test]
    fn test_loan_from_backend_json() {
        let loan: Loan = serde_json::from_str(loan_json()).expect("deserialize");
        assert_eq!(loan.id, LoanId::new(42));
        assert_eq!(loan.status, LoanStatus::Disbursing);
        assert_eq!(loan.amount, Decimal::new(15_000_000_00, 2));
        assert_eq!(
            loan.approval_date,
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
        assert!(loan.signature_date.is_none());
        assert!(loan.mortgage_amount.is_none());
    }

    #[test]
    fn test_loan_with_details_defaults_to_empty_collections() {
        let detail: LoanWithDetails = serde_json::from_str(loan_json()).expect("deserialize");
        assert_eq!(detail.loan.loan_number, "PR-2024-0042");
        assert!(detail.client.is_none());
        assert!(detail.disbursements.is_empty());
        assert!(detail.alerts.is_empty());
    }
}
