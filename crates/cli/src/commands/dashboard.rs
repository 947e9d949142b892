//! Dashboard screen: headline figures and alert counts.

use loantrack_client::cache::QueryKey;
use loantrack_client::guard::Location;
use loantrack_client::models::{AlertsSummary, DashboardStats};

use super::{AppContext, CommandError};

/// Render the dashboard.
///
/// Both queries go through the short-TTL cache so repeated renders inside
/// the freshness window reuse the same payloads.
///
/// # Errors
///
/// Returns the guard's denial when not signed in, or [`CommandError::Api`]
/// when either query fails.
pub async fn show(ctx: &AppContext) -> Result<(), CommandError> {
    let location = Location::new("/dashboard");
    ctx.guard(&location, None)?;

    let stats: DashboardStats = ctx
        .cache
        .get_or_fetch(QueryKey::DashboardStats, || ctx.api.dashboard_stats())
        .await
        .map_err(|e| ctx.fail(e))?;
    let alerts: AlertsSummary = ctx
        .cache
        .get_or_fetch(QueryKey::AlertsSummary, || ctx.api.alerts_summary())
        .await
        .map_err(|e| ctx.fail(e))?;

    println!("Dashboard");
    println!();
    println!(
        "{}",
        crate::render::detail(&[
            ("Clients", stats.total_clients.to_string()),
            ("Loans", stats.total_loans.to_string()),
            ("Pending disbursements", stats.pending_disbursements.to_string()),
            ("Outstanding amount", format!("{:.2}", stats.total_amount)),
        ])
    );
    println!();
    println!(
        "Alerts: {} total ({} red, {} orange)",
        alerts.total,
        alerts.red(),
        alerts.orange()
    );
    Ok(())
}
