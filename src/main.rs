// Storefront - terminal client for a product catalog with recommendations
//
// Browse and search products, like the ones you want, and get personalized
// recommendations from the storefront API.
//
// Architecture:
// - API client (reqwest): typed calls against the storefront REST backend
// - Session: the logged-in identity, persisted between runs
// - Controller: view-state machine that turns user actions into effects
// - Dispatcher: runs effects as detached tokio tasks, feeds outcomes back
// - TUI (ratatui): renders the controller's state and reads the keyboard
// - Demo backend (axum): in-process server with the same contract

mod api;
mod cli;
mod config;
mod controller;
mod demo;
mod dispatch;
mod logging;
mod session;
mod startup;
mod tui;
mod util;

use anyhow::{Context, Result};
use api::ApiClient;
use clap::Parser;
use cli::Cli;
use config::Config;
use controller::Controller;
use demo::DemoServer;
use dispatch::Dispatcher;
use logging::{LogBuffer, LogOutput};
use session::{Session, SessionStore};
use startup::StartupInfo;
use tui::theme::ThemeKind;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Precedence: --demo > env > file > defaults
    let mut config = Config::from_env();
    if cli.demo {
        config.demo_mode = true;
    }

    let log_buffer = LogBuffer::new();

    // Subcommands own the terminal briefly and log to stderr; the TUI
    // captures logs into the buffer so they don't garble the display.
    // The file guard must live until exit so buffered lines are flushed.
    if let Some(command) = cli.command {
        let _file_guard = logging::init(&config.logging, LogOutput::Stderr, &log_buffer);
        return cli::handle_command(command, &config).await;
    }
    let _file_guard = logging::init(&config.logging, LogOutput::Tui, &log_buffer);

    let demo = if config.demo_mode {
        Some(
            DemoServer::start(([127, 0, 0, 1], 0).into())
                .await
                .context("Failed to start demo backend")?,
        )
    } else {
        None
    };
    let api_url = demo
        .as_ref()
        .map(DemoServer::base_url)
        .unwrap_or_else(|| config.api_url.clone());

    let client = ApiClient::new(&api_url, config.recommendations.method)
        .with_context(|| format!("Invalid API URL: {}", api_url))?;
    let session = Session::open(SessionStore::new(&config.session_file));

    let info = StartupInfo {
        config: &config,
        api_url: &api_url,
        restored_user: session.identity().map(|id| id.username.as_str()),
    };
    startup::print_startup(&info);
    startup::log_startup(&info);

    let controller = Controller::new(session, config.recommendations.count);
    let (dispatcher, outcome_rx) = Dispatcher::new(client);

    tracing::info!("Starting TUI");
    if let Err(e) = tui::run_tui(
        controller,
        dispatcher,
        outcome_rx,
        log_buffer,
        ThemeKind::from_name(&config.theme),
    )
    .await
    {
        tracing::error!("TUI error: {:?}", e);
        eprintln!("Error: {:#}", e);
    }

    tracing::info!("Shutting down...");
    if let Some(demo) = demo {
        demo.shutdown().await;
    }

    Ok(())
}
