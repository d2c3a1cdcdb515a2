//! joplink - client library and CLI for a note application's local Data API

pub mod api;
pub mod cli;
pub mod connect;
pub mod domain;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, Write};

use api::HttpTransport;
use cli::{Cli, config::Config, handlers, logging};
use connect::Connector;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("failed to start logging")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.command.needs_connection() {
        handlers::dispatch_local(&cli.command, &mut out)?;
        out.flush()?;
        return Ok(());
    }
    handlers::validate(&cli.command)?;

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;

    let transport = HttpTransport::new(config.host()).context("failed to build HTTP client")?;
    let connector = match config.port(cli.port) {
        Some(port) => Connector::new().ports(port..=port),
        None => Connector::new(),
    };

    if config.api_token().is_none() {
        eprintln!("No API token configured; accept the authorization request in the application.");
    }
    let connection = connector
        .connect(transport, config.api_token())
        .context("failed to connect to the application")?;

    if connection.paired {
        config.api_token = Some(connection.session.token().to_string());
        config
            .save_to(&config_path)
            .context("failed to save the new API token")?;
        info!("event=token_saved path={}", config_path.display());
        eprintln!("Saved API token to {}", config_path.display());
    }

    handlers::dispatch(&cli.command, &connection.session, &mut out)?;
    out.flush()?;
    Ok(())
}
