use serde::{Deserialize, Serialize};
use crate::models::User;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Pulls a human-readable message out of a raw response body, if there is one.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    /// The `message` field alone, ignoring `error`. Login shows this text or
    /// a generic fallback, never a status phrase.
    pub fn server_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
