//! Error types for Cadence

use thiserror::Error;

/// The main error type for Cadence operations
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Invalid timing policy: {0}")]
    InvalidPolicy(String),

    #[error("Unit '{name}' failed during {phase}: {message}")]
    UnitFailed {
        name: String,
        phase: String,
        message: String,
    },

    #[error("Profile error: {0}")]
    ProfileError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

impl From<toml::de::Error> for CadenceError {
    fn from(err: toml::de::Error) -> Self {
        CadenceError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CadenceError {
    fn from(err: toml::ser::Error) -> Self {
        CadenceError::TomlSerError(err.to_string())
    }
}
