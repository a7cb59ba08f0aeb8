//! Error types for the group manager.
//!
//! Startup failures (`ConfigError`, `AuthError`) are fatal. `RemoteCallError`
//! is reported to the operator and the menu keeps running.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level error returned by bootstrap and the menu driver
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Missing or malformed configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required variable {0} is not set")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be an unsigned integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("failed to read private key '{path}': {error}")]
    KeyUnreadable { path: PathBuf, error: io::Error },

    #[error("private key '{path}' is not a valid RSA PEM key: {error}")]
    KeyInvalid {
        path: PathBuf,
        error: jsonwebtoken::errors::Error,
    },
}

/// Failures obtaining an access token
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to sign client assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("token request rejected: {status} - {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("failed to parse token response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failures of a single create/list/delete call
#[derive(Error, Debug)]
pub enum RemoteCallError {
    #[error("{status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Specialized result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for remote group calls
pub type RemoteResult<T> = std::result::Result<T, RemoteCallError>;
