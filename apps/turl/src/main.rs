use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ApiClient, Environment, StatusView, WorkflowController};
use shared::domain::LifetimeChoice;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(name = "turl", about = "Shorten URLs and manage their lifetime")]
struct Cli {
    /// Service base URL; overrides settings file and environment.
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[arg(long, global = true)]
    env: Option<Environment>,
    /// Settings file (defaults to ./turl.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Shorten {
        url: String,
        #[arg(long, default_value_t = LifetimeChoice::ThirtyDays)]
        lifetime: LifetimeChoice,
        #[arg(long, default_value = "6")]
        length: String,
        /// Copy the short URL to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    Check {
        short_url: String,
    },
    /// Check a short URL, then extend its lifetime.
    Extend {
        short_url: String,
        #[arg(long)]
        lifetime: LifetimeChoice,
    },
    /// Print the resolved endpoint table.
    Endpoints,
    /// Interactive session keeping workflow state between commands.
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(base_url) = cli.base_url {
        settings.api_base_url = Some(base_url);
    }
    if let Some(env) = cli.env {
        settings.environment = env;
    }
    tracing::debug!(?settings, "settings resolved");

    let client = ApiClient::from_settings(&settings)?;
    let workflow = WorkflowController::new(client);

    match cli.command {
        Command::Shorten {
            url,
            lifetime,
            length,
            copy,
        } => {
            workflow.set_shorten_input(url).await;
            let outcome = workflow
                .shorten(lifetime.as_str(), &length)
                .await
                .map_err(render::into_report)?;
            println!("{}", render::shorten_outcome(&outcome));
            if copy {
                println!("Copied to clipboard (held until something else is copied)");
                let short_url = outcome.short_url.clone();
                tokio::task::spawn_blocking(move || clipboard::copy_and_hold(&short_url))
                    .await
                    .context("clipboard task failed")?
                    .map_err(|err| anyhow::anyhow!("failed to copy to clipboard: {err}"))?;
            }
        }
        Command::Check { short_url } => {
            workflow.set_check_input(short_url).await;
            let status = workflow.check().await.map_err(render::into_report)?;
            println!("{}", StatusView::from(&status));
        }
        Command::Extend {
            short_url,
            lifetime,
        } => {
            workflow.set_check_input(short_url).await;
            workflow.check().await.map_err(render::into_report)?;
            let status = workflow
                .extend(lifetime.as_str())
                .await
                .map_err(render::into_report)?;
            println!("Lifetime extended");
            println!("{}", StatusView::from(&status));
        }
        Command::Endpoints => {
            print!("{}", render::endpoints(workflow.client().registry()));
        }
        Command::Session => {
            session::run(&workflow).await?;
        }
    }

    Ok(())
}
