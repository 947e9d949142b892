//! Sign-in, sign-out, and identity commands.

use std::io::{BufRead, Write as _};

use secrecy::SecretString;

use loantrack_client::guard::Location;

use super::{AppContext, CommandError};

/// Sign in and persist the session.
///
/// The password comes from the `-p` flag, the `LOANTRACK_PASSWORD`
/// environment variable, or an interactive prompt, in that order.
///
/// # Errors
///
/// Returns [`CommandError::Api`] when the API rejects the credentials or
/// the request fails.
pub async fn login(
    ctx: &AppContext,
    username: &str,
    password: Option<String>,
) -> Result<(), CommandError> {
    let password = match password
        .or_else(|| std::env::var("LOANTRACK_PASSWORD").ok())
    {
        Some(p) => SecretString::from(p),
        None => prompt_password()?,
    };

    ctx.store.login(&ctx.api, username, &password).await?;

    let session = ctx.store.snapshot();
    if let Some(user) = session.user {
        println!("Signed in as {} ({})", user.full_name, user.role);
        if let Some(agency) = user.agency {
            println!("Agency: {agency}");
        }
    }
    Ok(())
}

/// Sign out. Idempotent; never fails.
pub fn logout(ctx: &AppContext) {
    ctx.store.logout();
    println!("Signed out.");
}

/// Show the signed-in identity, verified against `/auth/me`.
///
/// # Errors
///
/// Returns the guard's denial when not signed in, or
/// [`CommandError::Api`] when the token is rejected.
pub async fn whoami(ctx: &AppContext) -> Result<(), CommandError> {
    let location = Location::new("/settings");
    ctx.guard(&location, None)?;

    let user = ctx.api.me().await.map_err(|e| ctx.fail(e))?;
    println!("{} <{}>", user.full_name, user.email);
    println!("Username: {}", user.username);
    println!("Role:     {}", user.role);
    if let Some(agency) = &user.agency {
        println!("Agency:   {agency}");
    }
    println!("Language: {}", user.preferred_language);
    Ok(())
}

fn prompt_password() -> Result<SecretString, CommandError> {
    // Plain stdin read; terminals that need no-echo input can pipe the
    // password or use LOANTRACK_PASSWORD.
    eprint!("Password: ");
    std::io::stderr()
        .flush()
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    Ok(SecretString::from(line.trim_end().to_string()))
}
