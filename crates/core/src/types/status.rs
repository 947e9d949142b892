//! Status enums for loans, disbursements, and alerts.
//!
//! Wire values match the backend's (French) enum values exactly; the Rust
//! variant names are the English equivalents used throughout this codebase.

use serde::{Deserialize, Serialize};

/// Loan product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    #[serde(rename = "PRET_CLASSIQUE_ACQUEREUR")]
    ClassicAcquirer,
    #[serde(rename = "PRET_CLASSIQUE_CONSTRUCTEUR")]
    ClassicBuilder,
    #[serde(rename = "PRET_LOCATIF_ORDINAIRE")]
    RentalOrdinary,
    #[serde(rename = "FONCIER_CLASSIQUE_JEUNES")]
    YoungLand,
}

/// Lifecycle status of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoanStatus {
    #[default]
    #[serde(rename = "BROUILLON")]
    Draft,
    #[serde(rename = "APPROUVE")]
    Approved,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "DEBLOCAGE")]
    Disbursing,
    #[serde(rename = "COMPLETE")]
    Completed,
    #[serde(rename = "ANNULE")]
    Cancelled,
    #[serde(rename = "SUSPENDU")]
    Suspended,
}

/// Lifecycle status of a single disbursement (tranche release).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisbursementStatus {
    #[default]
    #[serde(rename = "DEMANDE")]
    Requested,
    #[serde(rename = "APPROUVE")]
    Approved,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "COMPLETE")]
    Completed,
    #[serde(rename = "REJETE")]
    Rejected,
    #[serde(rename = "SUSPENDU")]
    Suspended,
}

/// Category of a monitoring alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    ValidityWarning,
    ValidityCritical,
    WorkDelayWarning,
    WorkDelayCritical,
    RepaymentUpcoming,
    RepaymentImminent,
    MissingDocument,
    DocumentExpiry,
}

/// Workflow status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    #[default]
    Pending,
    Acknowledged,
    Resolved,
    Escalated,
}

/// Severity level of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    /// Warning - attention needed soon.
    Orange,
    /// Critical - immediate attention required.
    Red,
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ClassicAcquirer => "classic (acquirer)",
            Self::ClassicBuilder => "classic (builder)",
            Self::RentalOrdinary => "rental (ordinary)",
            Self::YoungLand => "land (young buyers)",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::InProgress => "in progress",
            Self::Disbursing => "disbursing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Suspended => "suspended",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for DisbursementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ValidityWarning => "validity warning",
            Self::ValidityCritical => "validity critical",
            Self::WorkDelayWarning => "work delay warning",
            Self::WorkDelayCritical => "work delay critical",
            Self::RepaymentUpcoming => "repayment upcoming",
            Self::RepaymentImminent => "repayment imminent",
            Self::MissingDocument => "missing document",
            Self::DocumentExpiry => "document expiry",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
            Self::Escalated => "escalated",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Orange => f.write_str("ORANGE"),
            Self::Red => f.write_str("RED"),
        }
    }
}
