use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use camps_cli::commands::{camps, login, people, plans, quote};
use camps_cli::{CampsAction, Cli, Commands, Config, PeopleAction, PlansAction};

/// Loads the configuration and builds an API client from it.
fn build_client(config_path: Option<&Path>) -> Result<camps_api::Client> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    camps_api::Client::new(&config.base_url, config.token)
        .context("failed to build API client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Login { email, password }) => {
            let client = build_client(cli.config.as_deref())?;
            login::run(&client, email, password).await?;
        }
        Some(Commands::People { action }) => {
            let client = build_client(cli.config.as_deref())?;
            match action {
                PeopleAction::List { json } => people::list(&client, *json).await?,
                PeopleAction::Add { name, birthdate } => {
                    people::add(&client, name, *birthdate).await?;
                }
                PeopleAction::Rm { id } => people::remove(&client, *id).await?,
            }
        }
        Some(Commands::Camps { action }) => {
            let client = build_client(cli.config.as_deref())?;
            match action {
                CampsAction::List { json, for_people } => {
                    camps::list(&client, *json, for_people).await?;
                }
                CampsAction::Show {
                    id,
                    with_people,
                    on,
                } => camps::show(&client, *id, with_people, *on).await?,
            }
        }
        Some(Commands::Plans { action }) => {
            let client = build_client(cli.config.as_deref())?;
            match action {
                PlansAction::List { json } => plans::list(&client, *json).await?,
                PlansAction::Show { id, on } => plans::show(&client, *id, *on).await?,
                PlansAction::Rename { id, name } => plans::rename(&client, *id, name).await?,
                PlansAction::Rm { id } => plans::remove(&client, *id).await?,
            }
        }
        Some(Commands::Quote {
            pairs,
            on,
            json,
            save,
        }) => {
            let client = build_client(cli.config.as_deref())?;
            quote::run(&client, pairs, *on, *json, save.as_deref()).await?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
