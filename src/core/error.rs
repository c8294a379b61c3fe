//! Error types for the adapter

use thiserror::Error;

/// Crate-wide error type
///
/// Translation paths never return these: they log and degrade instead.
/// Errors only surface from configuration loading, resource parsing and
/// plugin installation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid inline resource: {0}")]
    InvalidResource(#[from] serde_json::Error),

    #[error("Invalid component props: {0}")]
    InvalidProps(String),

    #[error("Plugin already installed: {0}")]
    AlreadyInstalled(&'static str),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
