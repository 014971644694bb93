//! Error handling for the admin proxy
//!
//! Every failure a request can hit is one of the `ProxyError` variants. Each
//! variant knows its HTTP status and JSON body, so the HTTP front and the
//! CLI render failures the same way.

use serde_json::{Value, json};
use std::path::PathBuf;
use thiserror::Error;

/// Request-level failures, converted to a status and body at the handler boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The container command exited non-zero or could not be launched
    #[error("{message}")]
    Execution { message: String },

    /// A caller-supplied parameter failed its format check
    #[error("Invalid or missing '{field}' parameter")]
    Validation { field: String },

    /// The command succeeded but its output did not have the expected shape
    #[error("{reason}")]
    Parse { reason: String, raw_output: String },

    /// The command succeeded and parsed, but yielded nothing
    #[error("{message}")]
    EmptyResult { message: String },
}

impl ProxyError {
    /// HTTP status code for this error.
    ///
    /// Validation failures map to 404, not 400.
    pub fn status(&self) -> u16 {
        match self {
            Self::Execution { .. } => 500,
            Self::Validation { .. } | Self::Parse { .. } | Self::EmptyResult { .. } => 404,
        }
    }

    /// JSON body returned to the client
    pub fn body(&self) -> Value {
        match self {
            Self::Execution { message } => json!({ "error": message }),
            Self::Validation { .. } => json!({ "error": self.to_string() }),
            Self::Parse { reason, raw_output } => {
                json!({ "error": reason, "raw_output": raw_output })
            }
            Self::EmptyResult { message } => json!({ "message": message }),
        }
    }

    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Execution { .. } => "EXECUTION_FAILED",
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::Parse { .. } => "PARSE_FAILED",
            Self::EmptyResult { .. } => "EMPTY_RESULT",
        }
    }
}

/// Configuration load and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {}", .path.display(), .message)]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to parse YAML config {}: {}", .path.display(), .message)]
    ParseFailed { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid configuration: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },
}
