use thiserror::Error;

/// Top-level error type for the asteroid tracker.
///
/// Covers configuration and serving. Feed and chat crates keep their own
/// error types.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NeoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for NeoError {
    fn from(err: toml::de::Error) -> Self {
        NeoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NeoError {
    fn from(err: toml::ser::Error) -> Self {
        NeoError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NeoError {
    fn from(err: serde_json::Error) -> Self {
        NeoError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for tracker operations.
pub type Result<T> = std::result::Result<T, NeoError>;
