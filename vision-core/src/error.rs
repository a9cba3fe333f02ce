//! Gateway error taxonomy
//!
//! Only authentication failures interrupt the user. Everything else degrades
//! to an empty or reverted view and is logged.

use thiserror::Error;

/// Common result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Sign-in, sign-up or token problems
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// No signed-in user
    #[error("No signed-in user")]
    MissingIdentity,
    /// The gateway answered with a non-success status
    #[error("Gateway returned {status}: {message}")]
    Http { status: u16, message: String },
    /// The request never got an answer
    #[error("Network error: {0}")]
    Transport(String),
    /// The answer could not be decoded
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth(_))
    }

    /// Message suitable for a blocking alert
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Auth(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}
