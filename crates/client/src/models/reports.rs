//! Reporting payloads.

use serde::{Deserialize, Serialize};

/// Headline figures from `/reports/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of registered clients.
    pub total_clients: i64,
    /// Number of loans on the books.
    pub total_loans: i64,
    /// Disbursement requests awaiting a decision.
    pub pending_disbursements: i64,
    /// Total outstanding amount across active loans.
    ///
    /// The backend emits this as a JSON number, not a decimal string, so it
    /// maps to `f64`; it is a display-only aggregate.
    #[serde(default)]
    pub total_amount: f64,
}
