//! # Error Types
//!
//! Custom error types for Pad Rumble using `thiserror`.

use thiserror::Error;

/// Main error type for Pad Rumble
#[derive(Debug, Error)]
pub enum RumbleError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A native controller call failed
    #[error("Controller error: {0}")]
    Controller(String),

    /// The platform input library could not be loaded
    #[error("Input backend unavailable: {0}")]
    Backend(String),

    /// Tracing subscriber could not be installed
    #[error("Logging setup error: {0}")]
    Logging(String),
}

/// Result type alias for Pad Rumble
pub type Result<T> = std::result::Result<T, RumbleError>;
