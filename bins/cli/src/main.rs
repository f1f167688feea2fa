//! Tesoreria operator CLI.
//!
//! Drives the back-office REST API: cheque transitions and payment batches,
//! stock movements, bank accounts, checkbooks and purchase orders.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tesoreria_client::ApiClient;
use tesoreria_shared::AppConfig;
use tesoreria_shared::types::UsuarioId;

/// Back-office operator commands.
#[derive(Debug, Parser)]
#[command(name = "tesoreria", version, about)]
struct Cli {
    /// API base URL, overriding configuration.
    #[arg(long, global = true, env = "TESORERIA_BASE_URL")]
    base_url: Option<String>,

    /// Acting user id sent as `usuario_log_id`.
    #[arg(long, global = true, value_parser = clap::value_parser!(i64).range(1..))]
    usuario: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cheque lifecycle, images and payment batches.
    #[command(subcommand)]
    Cheque(commands::cheque::ChequeCommand),
    /// Stock movements.
    #[command(subcommand)]
    Stock(commands::stock::StockCommand),
    /// Bank accounts.
    #[command(subcommand)]
    Cuenta(commands::bank::AccountCommand),
    /// Checkbooks.
    #[command(subcommand)]
    Chequera(commands::bank::CheckbookCommand),
    /// Purchase orders.
    #[command(subcommand)]
    Oc(commands::purchase_order::PurchaseOrderCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tesoreria=info,tesoreria_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_with_base_url(cli.base_url)?;
    let mut client = ApiClient::new(&config)?;
    if let Some(usuario) = cli.usuario {
        client = client.with_usuario(Some(UsuarioId::new(usuario)));
    }
    tracing::debug!(base_url = %config.api.base_url, "client ready");

    match cli.command {
        Command::Cheque(cmd) => commands::cheque::run(&client, cmd).await,
        Command::Stock(cmd) => commands::stock::run(&client, cmd).await,
        Command::Cuenta(cmd) => commands::bank::run_account(&client, cmd).await,
        Command::Chequera(cmd) => commands::bank::run_checkbook(&client, cmd).await,
        Command::Oc(cmd) => commands::purchase_order::run(&client, cmd).await,
    }
}
