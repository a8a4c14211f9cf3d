use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use tokio::sync::mpsc;

use chirp::app::{App, AppEvent};
use chirp::client::{Client, Identity};
use chirp::config::Config;
use chirp::session::Session;
use chirp::theme::ThemeVariant;
use chirp::ui;

/// Get the config directory path (~/.config/chirp/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("chirp"))
}

#[derive(Parser, Debug)]
#[command(
    name = "chirp",
    about = "Terminal client for an ephemeral micro-posting service"
)]
struct Args {
    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Run against a local in-memory service (no network, single user)
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path).context("Failed to load configuration")?;

    if let Some(server) = args.server {
        config.server_url = server;
    }

    // Env var takes precedence over the config file
    let api_key = std::env::var("CHIRP_API_KEY")
        .ok()
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();

    let client = if args.offline {
        tracing::info!("Running offline against the in-memory service");
        Client::in_memory(Identity {
            uid: "local".to_string(),
            display_name: "Local User".to_string(),
        })
    } else {
        Client::connect(&config.server_url, SecretString::from(api_key))
            .with_context(|| format!("Invalid service URL: {}", config.server_url))?
    };

    let theme = ThemeVariant::from_str_name(&config.theme).unwrap_or(ThemeVariant::Day);

    let (session, _identity_rx) = Session::new(client.clone());
    let mut app = App::new(client, session, theme);
    if !config.display_full_name {
        app.toggle_label_mode();
    }

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
