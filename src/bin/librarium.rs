use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use librarium::config::{AuthConfig, ScraperConfig, ServerConfig, StoreConfig};
use librarium::domain::Role;
use librarium::handlers::{self, users::register::create_account};
use librarium::scraper::{BnClient, Ingestor};
use librarium::{microsvc, routes, telemetry, Database, Library};

#[derive(Parser, Debug)]
#[command(name = "librarium", version, about = "Personal library backend")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API.
    Serve {
        #[command(flatten)]
        server: ServerConfig,
        #[command(flatten)]
        auth: AuthConfig,
    },
    /// Import books from the National Library catalogue.
    Scrape {
        #[command(flatten)]
        scraper: ScraperConfig,
    },
}

fn open_store(config: &StoreConfig) -> Result<Database> {
    match &config.data_file {
        Some(path) => Database::open(path)
            .with_context(|| format!("failed to open data file {}", path.display())),
        None => Ok(Database::in_memory()),
    }
}

/// Create the configured admin unless an account with that email exists.
fn bootstrap_admin(db: &Database, auth: &AuthConfig) -> Result<()> {
    let Some((email, password)) = auth.admin_credentials() else {
        return Ok(());
    };
    if db.users().find_by_email(email)?.is_some() {
        return Ok(());
    }
    create_account(db, email, "Administrator", password, Role::Admin)
        .map_err(|err| anyhow::anyhow!("failed to create admin account: {err}"))?;
    info!(email, "admin account created");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    telemetry::init_tracing(cli.debug)?;

    if matches!(cli.command, Command::Scrape { .. }) {
        cli.store.require_data_file("scrape")?;
    }
    let db = open_store(&cli.store)?;

    match cli.command {
        Command::Serve { server, auth } => {
            bootstrap_admin(&db, &auth)?;
            let library = Library::new(db, auth.token_settings());
            let service = Arc::new(handlers::service(library));
            microsvc::serve(service, routes::ROUTES, server.addr())
                .await
                .context("server failed")?;
        }
        Command::Scrape { scraper } => {
            let client = BnClient::new()?;
            let report = Ingestor::new(&db, client)
                .run(&scraper.start_url(), scraper.max_pages)
                .await?;
            info!(?report, "scrape finished");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
