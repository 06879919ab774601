//! Error types for the ng-payments library

use serde_json::Value;
use thiserror::Error;

/// Result type alias for ng-payments operations
pub type Result<T> = std::result::Result<T, NgPaymentsError>;

/// Main error type for ng-payments operations
#[derive(Error, Debug)]
pub enum NgPaymentsError {
    /// Required request fields were absent or null
    #[error("Invalid request body: missing required fields [{}]", .missing.join(", "))]
    InvalidRequestBody { missing: Vec<String> },

    /// Gateway answered with a non-2xx status while HTTP exceptions were enabled
    #[error("Gateway responded with HTTP status {status}")]
    Transport { status: u16, body: Value },

    /// Transaction verification did not succeed
    #[error("Failed transaction: {reason}")]
    FailedTransaction { reason: String, response: Value },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value could not be stored in a typed attribute
    #[error("Invalid attribute '{key}': {reason}")]
    InvalidAttribute { key: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NgPaymentsError {
    /// Create an invalid request body error
    pub fn invalid_request_body<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidRequestBody {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a failed transaction error
    pub fn failed_transaction(reason: impl Into<String>, response: Value) -> Self {
        Self::FailedTransaction {
            reason: reason.into(),
            response,
        }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Raw gateway response carried by the error, if any
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Transport { body, .. } => Some(body),
            Self::FailedTransaction { response, .. } => Some(response),
            _ => None,
        }
    }
}
