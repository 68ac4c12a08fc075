//! Common error types for the Pokédex service

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Pokédex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Pokédex crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A table file could not be read or decoded
    #[error("Failed to load {}: {reason}", path.display())]
    DataLoad { path: PathBuf, reason: String },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
