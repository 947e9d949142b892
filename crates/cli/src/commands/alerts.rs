//! Alert screens and workflow actions.

use clap::Subcommand;

use loantrack_client::api::AlertFilter;
use loantrack_client::cache::QueryKey;
use loantrack_client::guard::Location;
use loantrack_core::{AlertId, AlertSeverity, AlertStatus, AlertType, LoanId};

use crate::render;

use super::{AppContext, CommandError, parse_wire};

/// Alert subcommands.
#[derive(Debug, Subcommand)]
pub enum AlertAction {
    /// List alerts
    List {
        /// Only alerts for this loan
        #[arg(long)]
        loan_id: Option<i32>,

        /// Severity (RED or ORANGE)
        #[arg(long)]
        severity: Option<String>,

        /// Workflow status (PENDING, ACKNOWLEDGED, RESOLVED, ESCALATED)
        #[arg(long)]
        status: Option<String>,

        /// Alert category, as the backend names it (e.g. VALIDITY_WARNING)
        #[arg(long = "type")]
        alert_type: Option<String>,

        /// Pagination offset
        #[arg(long)]
        skip: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Mark an alert as seen
    Acknowledge {
        /// Alert ID
        id: i32,
    },
    /// Mark an alert as dealt with
    Resolve {
        /// Alert ID
        id: i32,
    },
}

/// Dispatch an alert subcommand.
///
/// # Errors
///
/// Returns the guard's denial when not signed in, or
/// [`CommandError::Api`] when the API call fails.
pub async fn run(ctx: &AppContext, action: AlertAction) -> Result<(), CommandError> {
    match action {
        AlertAction::List {
            loan_id,
            severity,
            status,
            alert_type,
            skip,
            limit,
        } => {
            ctx.guard(&Location::new("/alerts"), None)?;
            let severity: Option<AlertSeverity> = severity.as_deref().map(parse_wire).transpose()?;
            let status: Option<AlertStatus> = status.as_deref().map(parse_wire).transpose()?;
            let alert_type: Option<AlertType> =
                alert_type.as_deref().map(parse_wire).transpose()?;
            let filter = AlertFilter {
                skip,
                limit,
                loan_id: loan_id.map(LoanId::new),
                severity,
                status,
                alert_type,
            };
            let alerts = ctx.api.list_alerts(&filter).await.map_err(|e| ctx.fail(e))?;

            let rows: Vec<Vec<String>> = alerts
                .iter()
                .map(|a| {
                    vec![
                        a.id.to_string(),
                        a.loan_id.to_string(),
                        a.severity.to_string(),
                        a.status.to_string(),
                        a.alert_type.to_string(),
                        render::timestamp(a.triggered_at),
                        a.message.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::table(
                    &["ID", "LOAN", "SEVERITY", "STATUS", "TYPE", "TRIGGERED", "MESSAGE"],
                    &rows
                )
            );
        }
        AlertAction::Acknowledge { id } => {
            let id = AlertId::new(id);
            ctx.guard(&Location::new(&format!("/alerts/{id}/acknowledge")), None)?;
            ctx.api
                .acknowledge_alert(id)
                .await
                .map_err(|e| ctx.fail(e))?;
            ctx.cache.invalidate(QueryKey::AlertsSummary).await;
            println!("Alert {id} acknowledged.");
        }
        AlertAction::Resolve { id } => {
            let id = AlertId::new(id);
            ctx.guard(&Location::new(&format!("/alerts/{id}/resolve")), None)?;
            ctx.api.resolve_alert(id).await.map_err(|e| ctx.fail(e))?;
            ctx.cache.invalidate(QueryKey::AlertsSummary).await;
            println!("Alert {id} resolved.");
        }
    }
    Ok(())
}
