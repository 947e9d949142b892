//! Client (borrower) screens.

use clap::Subcommand;

use loantrack_client::api::ClientFilter;
use loantrack_client::guard::Location;
use loantrack_core::ClientId;

use crate::render;

use super::{AppContext, CommandError};

/// Client subcommands.
#[derive(Debug, Subcommand)]
pub enum ClientAction {
    /// List clients
    List {
        /// Substring match on the client's name
        #[arg(long)]
        search: Option<String>,

        /// Only active (true) or inactive (false) clients
        #[arg(long)]
        active: Option<bool>,

        /// Pagination offset
        #[arg(long)]
        skip: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one client with their loans
    Show {
        /// Client ID
        id: i32,
    },
}

/// Dispatch a client subcommand.
///
/// # Errors
///
/// Returns the guard's denial when not signed in, or
/// [`CommandError::Api`] when the API call fails.
pub async fn run(ctx: &AppContext, action: ClientAction) -> Result<(), CommandError> {
    match action {
        ClientAction::List {
            search,
            active,
            skip,
            limit,
        } => {
            ctx.guard(&Location::new("/clients"), None)?;
            let filter = ClientFilter {
                skip,
                limit,
                search,
                is_active: active,
            };
            let clients = ctx
                .api
                .list_clients(&filter)
                .await
                .map_err(|e| ctx.fail(e))?;

            let rows: Vec<Vec<String>> = clients
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.client_number.clone(),
                        c.name.clone(),
                        c.phone.clone(),
                        if c.is_active { "active" } else { "inactive" }.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::table(&["ID", "NUMBER", "NAME", "PHONE", "STATE"], &rows)
            );
        }
        ClientAction::Show { id } => {
            let id = ClientId::new(id);
            ctx.guard(&Location::new(&format!("/clients/{id}")), None)?;
            let detail = ctx.api.get_client(id).await.map_err(|e| ctx.fail(e))?;

            let c = &detail.client;
            println!(
                "{}",
                render::detail(&[
                    ("Client", format!("{} ({})", c.name, c.client_number)),
                    ("Company", render::opt(c.company_name.as_ref())),
                    ("Address", c.address.clone()),
                    ("Phone", c.phone.clone()),
                    ("Email", render::opt(c.email.as_ref())),
                    ("ID card", render::opt(c.id_card_number.as_ref())),
                    (
                        "State",
                        if c.is_active { "active" } else { "inactive" }.to_string(),
                    ),
                ])
            );

            if !detail.loans.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = detail
                    .loans
                    .iter()
                    .map(|l| {
                        vec![
                            l.id.to_string(),
                            l.loan_number.clone(),
                            l.status.to_string(),
                            render::amount(l.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    render::table(&["ID", "NUMBER", "STATUS", "AMOUNT"], &rows)
                );
            }
        }
    }
    Ok(())
}
