// CLI module - command-line argument parsing and handlers
//
// Running without a subcommand starts the TUI. Subcommands cover
// configuration and session management without taking over the terminal:
// - config --show/--path/--reset/--edit
// - whoami: print the persisted identity
// - logout: clear the persisted identity
// - recommend: print recommendations for the persisted identity

use crate::api::{ApiClient, ApiError, Product};
use crate::config::{Config, VERSION};
use crate::demo::DemoServer;
use crate::session::{Session, SessionStore};
use crate::util::pad_display;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Storefront - browse products and get recommendations from the terminal
#[derive(Parser)]
#[command(name = "storefront")]
#[command(version = VERSION)]
#[command(about = "Terminal storefront client with personalized recommendations", long_about = None)]
pub struct Cli {
    /// Run against a built-in demo backend (also STOREFRONT_DEMO=1)
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Show the logged-in user
    Whoami,

    /// Forget the logged-in user
    Logout,

    /// Print recommendations for the logged-in user
    Recommend {
        /// Number of recommendations (defaults to config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

/// Run a subcommand to completion
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Config {
            show,
            reset,
            edit,
            path,
        } => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show(config);
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                println!("Usage: storefront config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            Ok(())
        }
        Commands::Whoami => {
            let session = Session::open(SessionStore::new(&config.session_file));
            match session.identity() {
                Some(id) => println!("{} <{}> ({})", id.username, id.email, id.user_id),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Commands::Logout => {
            let mut session = Session::open(SessionStore::new(&config.session_file));
            let was_logged_in = session.is_authenticated();
            session.end()?;
            if was_logged_in {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
        Commands::Recommend { count } => {
            let count = count.unwrap_or(config.recommendations.count);
            handle_recommend(config, count).await
        }
    }
}

async fn handle_recommend(config: &Config, count: usize) -> Result<()> {
    let session = Session::open(SessionStore::new(&config.session_file));
    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    let demo = if config.demo_mode {
        Some(DemoServer::start(([127, 0, 0, 1], 0).into()).await?)
    } else {
        None
    };
    let api_url = demo
        .as_ref()
        .map(|d| d.base_url())
        .unwrap_or_else(|| config.api_url.clone());
    let client = ApiClient::new(&api_url, config.recommendations.method)?;

    let result = recommendations_for(&session, &client, count).await;
    if let Some(demo) = demo {
        demo.shutdown().await;
    }

    let products = result
        .with_context(|| format!("Failed to fetch recommendations from {}", api_url))?
        .unwrap_or_default();
    if products.is_empty() {
        println!("No recommendations yet. Interact with products to get personalized suggestions!");
    }
    for product in &products {
        println!("{}", recommendation_line(product));
    }
    Ok(())
}

/// Recommendations for the session's identity; `None` (and no request) when
/// nobody is logged in
pub(crate) async fn recommendations_for(
    session: &Session,
    client: &ApiClient,
    count: usize,
) -> Result<Option<Vec<Product>>, ApiError> {
    let Some(identity) = session.identity() else {
        return Ok(None);
    };
    client
        .get_recommendations(&identity.user_id, count)
        .await
        .map(Some)
}

/// "name  $price  Match: X%"
pub(crate) fn recommendation_line(product: &Product) -> String {
    let mut line = format!(
        "{}  {:>10}",
        pad_display(&product.name, 32),
        product.price_label()
    );
    if let Some(label) = product.match_label() {
        line.push_str("  ");
        line.push_str(&label);
    }
    line
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!("# demo_mode = {}", config.demo_mode);

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = Config::default().save() {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}
