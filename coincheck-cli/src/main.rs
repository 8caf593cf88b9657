//! coincheck - command-line client for the Coincheck REST API
//!
//! Run with: cargo run -p coincheck-cli -- ticker

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use coincheck_rest::{ClientConfig, CoincheckClient, Credentials};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors print to stderr and exit with status 2
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;

    match cli.command {
        Command::Ticker => print_json(&client.ticker().await?),
        Command::OrderHistory(args) => {
            let page = args.to_pagination();
            print_json(&client.order_history(page.as_ref()).await?)
        }
        Command::SentHistory { currency } => print_json(&client.sent_history(&currency).await?),
        Command::DepositHistory { currency } => {
            print_json(&client.deposit_history(&currency).await?)
        }
        Command::OpenOrders => print_json(&client.open_orders().await?),
    }
}

fn build_client(cli: &Cli) -> Result<CoincheckClient> {
    let mut config = ClientConfig::new()
        .with_base_url(cli.base_url.clone())
        .with_timeout(cli.timeout);

    // Public commands work without credentials
    if cli.command.is_private() {
        let credentials = Credentials::from_env().context("loading API credentials")?;
        config = config.with_credentials(credentials);
    }

    CoincheckClient::with_config(config).context("building client")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
