use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)] // Default resolved in main.rs
    pub config: Option<PathBuf>,

    /// Override the API base URL from the configuration
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}
