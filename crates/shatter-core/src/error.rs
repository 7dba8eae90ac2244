//! Error types for Shatter

use thiserror::Error;

/// The main error type for Shatter operations
#[derive(Debug, Error)]
pub enum ShatterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Scene error: {0}")]
    SceneError(String),
}

/// Result type alias for Shatter operations
pub type Result<T> = std::result::Result<T, ShatterError>;

impl From<toml::de::Error> for ShatterError {
    fn from(err: toml::de::Error) -> Self {
        ShatterError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ShatterError {
    fn from(err: toml::ser::Error) -> Self {
        ShatterError::TomlSerError(err.to_string())
    }
}
