//! Error types for the documentation bot.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BotError>;

/// Errors that can occur while loading, resolving, or talking to Reddit.
#[derive(Debug, Error)]
pub enum BotError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credentials file could not be parsed
    #[error("Invalid credentials file: {0}")]
    CredentialsFile(#[from] toml::de::Error),

    /// The reference table could not be read or parsed
    #[error("Could not load reference table from {path}: {reason}")]
    ReferenceTable { path: PathBuf, reason: String },

    /// Neither the credentials file nor the environment had all four values
    #[error("No credentials found in {file} and environment variables were not set")]
    MissingCredentials { file: PathBuf },

    /// Reddit rejected a request
    #[error("Reddit API error: {0}")]
    Reddit(String),

    /// The supervisor ran out of restarts
    #[error("Gave up after {attempts} consecutive failures, last error: {last_error}")]
    RestartsExhausted { attempts: u32, last_error: String },
}
