//! Disbursement screens and workflow actions.

use clap::Subcommand;

use loantrack_client::api::DisbursementFilter;
use loantrack_client::cache::QueryKey;
use loantrack_client::guard::Location;
use loantrack_core::{DisbursementId, DisbursementStatus, LoanId, UserRole};

use crate::render;

use super::{AppContext, CommandError, parse_wire};

/// Roles allowed to move a disbursement through its workflow.
const DECISION_ROLES: [UserRole; 2] = [UserRole::Admin, UserRole::AdministrateurPrets];

/// Disbursement subcommands.
#[derive(Debug, Subcommand)]
pub enum DisbursementAction {
    /// List disbursements
    List {
        /// Only tranches of this loan
        #[arg(long)]
        loan_id: Option<i32>,

        /// Workflow status, as the backend names it (e.g. DEMANDE)
        #[arg(long)]
        status: Option<String>,

        /// Pagination offset
        #[arg(long)]
        skip: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one disbursement
    Show {
        /// Disbursement ID
        id: i32,
    },
    /// Approve a requested disbursement (loan administrators only)
    Approve {
        /// Disbursement ID
        id: i32,
    },
    /// Release the funds for an approved disbursement (loan administrators only)
    Disburse {
        /// Disbursement ID
        id: i32,
    },
}

/// Dispatch a disbursement subcommand.
///
/// # Errors
///
/// Returns the guard's denial when not signed in or the role can't take
/// the action, or [`CommandError::Api`] when the API call fails.
pub async fn run(ctx: &AppContext, action: DisbursementAction) -> Result<(), CommandError> {
    match action {
        DisbursementAction::List {
            loan_id,
            status,
            skip,
            limit,
        } => {
            ctx.guard(&Location::new("/disbursements"), None)?;
            let status: Option<DisbursementStatus> =
                status.as_deref().map(parse_wire).transpose()?;
            let filter = DisbursementFilter {
                skip,
                limit,
                loan_id: loan_id.map(LoanId::new),
                status,
            };
            let disbursements = ctx
                .api
                .list_disbursements(&filter)
                .await
                .map_err(|e| ctx.fail(e))?;

            let rows: Vec<Vec<String>> = disbursements
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.loan_id.to_string(),
                        format!("#{}", d.disbursement_number),
                        d.status.to_string(),
                        render::amount(d.requested_amount),
                        d.request_date.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::table(
                    &["ID", "LOAN", "TRANCHE", "STATUS", "REQUESTED", "DATE"],
                    &rows
                )
            );
        }
        DisbursementAction::Show { id } => {
            let id = DisbursementId::new(id);
            ctx.guard(&Location::new(&format!("/disbursements/{id}")), None)?;
            let d = ctx
                .api
                .get_disbursement(id)
                .await
                .map_err(|e| ctx.fail(e))?;

            println!(
                "{}",
                render::detail(&[
                    (
                        "Disbursement",
                        format!("#{} of loan {}", d.disbursement_number, d.loan_id),
                    ),
                    ("Status", d.status.to_string()),
                    ("Requested", render::amount(d.requested_amount)),
                    (
                        "Approved",
                        d.approved_amount.map_or_else(|| "-".to_string(), render::amount),
                    ),
                    (
                        "Disbursed",
                        d.disbursed_amount.map_or_else(|| "-".to_string(), render::amount),
                    ),
                    (
                        "Requested on",
                        d.request_date.format("%Y-%m-%d").to_string(),
                    ),
                    ("Approved on", render::opt_date(d.approval_date)),
                    ("Released on", render::opt_date(d.disbursement_date)),
                    ("Work", d.work_description.clone()),
                    ("Completion", format!("{} %", d.work_completion_percentage)),
                    ("Site visited", render::opt_date(d.site_visit_date)),
                    ("BET", render::opt(d.bet_name.as_ref())),
                    (
                        "BET report",
                        if d.bet_report_received { "received" } else { "pending" }.to_string(),
                    ),
                ])
            );
        }
        DisbursementAction::Approve { id } => {
            let id = DisbursementId::new(id);
            ctx.guard(
                &Location::new(&format!("/disbursements/{id}/approve")),
                Some(&DECISION_ROLES),
            )?;
            ctx.api
                .approve_disbursement(id)
                .await
                .map_err(|e| ctx.fail(e))?;
            ctx.cache.invalidate(QueryKey::DashboardStats).await;
            println!("Disbursement {id} approved.");
        }
        DisbursementAction::Disburse { id } => {
            let id = DisbursementId::new(id);
            ctx.guard(
                &Location::new(&format!("/disbursements/{id}/disburse")),
                Some(&DECISION_ROLES),
            )?;
            ctx.api
                .release_disbursement(id)
                .await
                .map_err(|e| ctx.fail(e))?;
            ctx.cache.invalidate(QueryKey::DashboardStats).await;
            println!("Disbursement {id} released.");
        }
    }
    Ok(())
}
