//! Alert resource models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loantrack_core::{AlertId, AlertSeverity, AlertStatus, AlertType, LoanId};

/// A monitoring alert raised against a loan, as returned by `/alerts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Database ID.
    pub id: AlertId,
    /// Loan this alert concerns.
    pub loan_id: LoanId,
    /// What triggered the alert.
    pub alert_type: AlertType,
    /// Workflow status.
    pub status: AlertStatus,
    /// Severity level.
    pub severity: AlertSeverity,
    /// Human-readable description.
    pub message: String,
    /// When the alert fired.
    pub triggered_at: DateTime<Utc>,
    /// When a user acknowledged it.
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// When it was resolved.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Whether a notification email went out.
    #[serde(default)]
    pub email_sent: bool,
    /// Whether a notification SMS went out.
    #[serde(default)]
    pub sms_sent: bool,
}

/// Aggregated alert counts from `/alerts/summary/dashboard`.
///
/// The breakdown maps are keyed by the wire values (severity names, status
/// names, alert-type names); the backend occasionally includes keys outside
/// the current enum set, so they stay as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsSummary {
    /// Total number of alerts.
    pub total: i64,
    /// Counts per severity.
    #[serde(default)]
    pub by_severity: HashMap<String, i64>,
    /// Counts per workflow status.
    #[serde(default)]
    pub by_status: HashMap<String, i64>,
    /// Counts per alert type.
    #[serde(default)]
    pub by_type: HashMap<String, i64>,
}

impl AlertsSummary {
    /// Number of critical (`RED`) alerts.
    #[must_use]
    pub fn red(&self) -> i64 {
        self.by_severity
            .get(AlertSeverity::Red.to_string().as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Number of warning (`ORANGE`) alerts.
    #[must_use]
    pub fn orange(&self) -> i64 {
        self.by_severity
            .get(AlertSeverity::Orange.to_string().as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_from_backend_json() {
        let json = r#"{
            "id": 5,
            "loan_id": 42,
            "alert_type": "WORK_DELAY_WARNING",
            "status": "PENDING",
            "severity": "ORANGE",
            "message": "Travaux en retard de 45 jours",
            "triggered_at": "2024-07-01T06:00:00Z",
            "email_sent": true,
            "sms_sent": false
        }"#;
        let alert: Alert = serde_json::from_str(json).expect("deserialize");
        assert_eq!(alert.alert_type, AlertType::WorkDelayWarning);
        assert_eq!(alert.severity, AlertSeverity::Orange);
        assert!(alert.acknowledged_at.is_none());
        assert!(alert.email_sent);
    }

    #[test]
    fn test_summary_counts() {
        let json = r#"{
            "total": 9,
            "by_severity": {"RED": 2, "ORANGE": 6, "GREEN": 1},
            "by_status": {"PENDING": 5, "ACKNOWLEDGED": 3, "RESOLVED": 1},
            "by_type": {"VALIDITY_WARNING": 4}
        }"#;
        let summary: AlertsSummary = serde_json::from_str(json).expect("deserialize");
        assert_eq!(summary.total, 9);
        assert_eq!(summary.red(), 2);
        assert_eq!(summary.orange(), 6);
    }

    #[test]
    fn test_summary_defaults_when_maps_missing() {
        let summary: AlertsSummary = serde_json::from_str(r#"{"total": 0}"#).expect("deserialize");
        assert_eq!(summary.red(), 0);
        assert_eq!(summary.orange(), 0);
    }
}
