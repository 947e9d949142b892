//! Disbursement (tranche release) resource models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loantrack_core::{DisbursementId, DisbursementStatus, LoanId};

/// A single tranche release of a loan, as returned by `/disbursements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disbursement {
    /// Database ID.
    pub id: DisbursementId,
    /// Loan this tranche belongs to.
    pub loan_id: LoanId,
    /// Ordinal of this tranche within the loan (1-based).
    pub disbursement_number: i32,
    /// Workflow status.
    pub status: DisbursementStatus,
    /// Amount the client asked to release.
    pub requested_amount: Decimal,
    /// Amount approved by the loan administrator.
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
    /// Amount actually released.
    #[serde(default)]
    pub disbursed_amount: Option<Decimal>,
    /// When the release was requested.
    pub request_date: NaiveDate,
    /// When the release was approved.
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    /// When the funds were released.
    #[serde(default)]
    pub disbursement_date: Option<NaiveDate>,
    /// Description of the construction work this tranche funds.
    pub work_description: String,
    /// Reported completion of the funded work, 0-100.
    pub work_completion_percentage: i32,
    /// When the site was last visited.
    #[serde(default)]
    pub site_visit_date: Option<NaiveDate>,
    /// Findings from the site visit.
    #[serde(default)]
    pub site_visit_report: Option<String>,
    /// Technical inspection office (BET) in charge.
    #[serde(default)]
    pub bet_name: Option<String>,
    /// Whether the BET report has been received.
    #[serde(default)]
    pub bet_report_received: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
