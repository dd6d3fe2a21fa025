//! Error types for the comfort vignette library.
//!
//! The per-frame core never fails; these errors only surface from the
//! outer layers (configuration files, preset lookup, the CLI).

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preset lookup or application error
    #[error("Preset error: {0}")]
    PresetError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
