//! Loan screens.

use clap::Subcommand;

use loantrack_client::api::LoanFilter;
use loantrack_client::guard::Location;
use loantrack_core::{ClientId, LoanId, LoanStatus};

use crate::render;

use super::{AppContext, CommandError, parse_wire};

/// Loan subcommands.
#[derive(Debug, Subcommand)]
pub enum LoanAction {
    /// List loans
    List {
        /// Lifecycle status, as the backend names it (e.g. DEBLOCAGE)
        #[arg(long)]
        status: Option<String>,

        /// Only loans held by this client
        #[arg(long)]
        client_id: Option<i32>,

        /// Pagination offset
        #[arg(long)]
        skip: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one loan with borrower, disbursements, and alerts
    Show {
        /// Loan ID
        id: i32,
    },
}

/// Dispatch a loan subcommand.
///
/// # Errors
///
/// Returns the guard's denial when not signed in, or
/// [`CommandError::Api`] when the API call fails.
pub async fn run(ctx: &AppContext, action: LoanAction) -> Result<(), CommandError> {
    match action {
        LoanAction::List {
            status,
            client_id,
            skip,
            limit,
        } => {
            ctx.guard(&Location::new("/loans"), None)?;
            let status: Option<LoanStatus> = status.as_deref().map(parse_wire).transpose()?;
            let filter = LoanFilter {
                skip,
                limit,
                status,
                client_id: client_id.map(ClientId::new),
            };
            let loans = ctx.api.list_loans(&filter).await.map_err(|e| ctx.fail(e))?;

            let rows: Vec<Vec<String>> = loans
                .iter()
                .map(|l| {
                    vec![
                        l.id.to_string(),
                        l.loan_number.clone(),
                        l.client_id.to_string(),
                        l.status.to_string(),
                        render::amount(l.amount),
                        format!("{} mo", l.duration_months),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::table(
                    &["ID", "NUMBER", "CLIENT", "STATUS", "AMOUNT", "DURATION"],
                    &rows
                )
            );
        }
        LoanAction::Show { id } => {
            let id = LoanId::new(id);
            ctx.guard(&Location::new(&format!("/loans/{id}")), None)?;
            let detail = ctx.api.get_loan(id).await.map_err(|e| ctx.fail(e))?;

            let l = &detail.loan;
            let mut pairs = vec![
                ("Loan", l.loan_number.clone()),
                ("Type", l.loan_type.to_string()),
                ("Status", l.status.to_string()),
                ("Amount", render::amount(l.amount)),
                ("Rate", format!("{} %", l.interest_rate)),
                ("Monthly payment", render::amount(l.monthly_payment)),
                (
                    "Duration",
                    format!(
                        "{} months (grace {})",
                        l.duration_months, l.grace_period_months
                    ),
                ),
                ("Approved", render::opt_date(l.approval_date)),
                ("Signed", render::opt_date(l.signature_date)),
                ("First payment", render::opt_date(l.first_payment_date)),
                ("Validity ends", render::opt_date(l.validity_end_date)),
            ];
            if let Some(client) = &detail.client {
                pairs.push((
                    "Borrower",
                    format!("{} ({})", client.name, client.client_number),
                ));
            }
            println!("{}", render::detail(&pairs));

            if !detail.disbursements.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = detail
                    .disbursements
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.to_string(),
                            format!("#{}", d.disbursement_number),
                            d.status.to_string(),
                            render::amount(d.requested_amount),
                            format!("{} %", d.work_completion_percentage),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    render::table(&["ID", "TRANCHE", "STATUS", "REQUESTED", "WORK"], &rows)
                );
            }

            if !detail.alerts.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = detail
                    .alerts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.severity.to_string(),
                            a.status.to_string(),
                            a.message.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    render::table(&["ID", "SEVERITY", "STATUS", "MESSAGE"], &rows)
                );
            }
        }
    }
    Ok(())
}
