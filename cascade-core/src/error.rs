//! Error types for the Cascade core library.

use thiserror::Error;

/// Errors from configuration loading and provider-name parsing.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider name did not match the closed provider set.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Generic I/O error (config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
