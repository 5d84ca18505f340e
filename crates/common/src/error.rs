//! Error types for Roster

use thiserror::Error;

/// Result type alias using Roster Error
pub type Result<T> = std::result::Result<T, Error>;

/// Roster error types
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: unreachable host, connection reset, TLS.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not JSON or not the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP error! Status: {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidConfig(format!("invalid URL: {}", e))
    }
}

impl Error {
    /// HTTP status carried by the error, if it came from a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}
