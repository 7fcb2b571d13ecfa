use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

/// Fallback shown when the login endpoint rejects credentials without a message.
pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    AuthError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("API invalid format: {0}")]
    ApiInvalidFormat(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl Error {
    /// Text suitable for a toast or banner.
    pub fn user_message(&self) -> String {
        match self {
            Error::AuthError(msg) | Error::ValidationError(msg) => msg.clone(),
            Error::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ApiInvalidFormat(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;
