use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use log::{error, info};
use std::path::PathBuf;

use primetrade::api::ApiClient;
use primetrade::app::App;
use primetrade::cli::Cli;
use primetrade::config::Config;
use primetrade::logging;
use primetrade::session::{Session, SessionStore};
use primetrade::tui;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("config/config.toml"));
    let mut config = match Config::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", config_path, e);
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    logging::init(config.logging.file.as_deref(), cli.debug)
        .map_err(|e| anyhow::anyhow!("Logger initialization failed: {}", e))?;
    info!("Starting Primetrade dashboard");

    let session = if config.session.persist {
        info!("Restoring session from {:?}", config.session.path);
        Session::restore(SessionStore::new(config.session.path.clone()))
    } else {
        Session::new()
    };

    let api = ApiClient::new(&config.api, session.clone())?;
    info!("Using API at {}", api.base_url());
    let mut app = App::new(api, session);

    if let Err(e) = tui::run_tui(&mut app).await {
        error!("Terminal UI error: {}", e);
        return Err(e.into());
    }

    info!("Primetrade dashboard stopped.");
    Ok(())
}
