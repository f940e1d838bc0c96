//! Login command: exchange credentials for a bearer token.
//!
//! The token is printed, not stored; users pass it to later invocations
//! via `CAMPS_TOKEN` or the config file.

use anyhow::Result;
use camps_api::Client;

/// Runs the login command.
pub async fn run(client: &Client, email: &str, password: &str) -> Result<()> {
    let session = client.login(email, password).await?;

    println!(
        "Logged in as {} <{}>",
        session.user.name, session.user.email
    );
    println!();
    println!("Export the token for subsequent commands:");
    println!("  export CAMPS_TOKEN={}", session.token);
    Ok(())
}
