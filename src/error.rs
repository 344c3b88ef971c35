// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A response body did not have the expected shape.
    #[error("Decode Error: {0}")]
    Decode(String),

    /// The backend answered with an `{"error": ...}` body.
    #[error("API Error: {0}")]
    Api(String),
}

/// Failures of a durable key-value store.
///
/// The locale layer never surfaces these to its callers; they only reach
/// code that talks to a store directly.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StorageError {
    /// The store is disabled or cannot be reached at all.
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read storage: {0}")]
    Read(String),

    #[error("failed to write storage: {0}")]
    Write(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
