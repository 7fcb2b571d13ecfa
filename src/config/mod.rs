use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::Result;

pub const API_URL_ENV: &str = "PRIMETRADE_API_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the logged-in session on disk between runs.
    pub persist: bool,
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: false,
            path: PathBuf::from(".primetrade-session.json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file used while the terminal UI owns stdout. `None` falls back to env_logger.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("primetrade.log")),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise defaults, then applies environment overrides.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }
}
