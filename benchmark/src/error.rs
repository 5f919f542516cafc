//! @ai:module:intent Define error types for configuration resolution and dispatch
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all resolution operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or unrecognised user input. Always fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The target is well-formed but cannot be benchmarked.
    #[error("Invalid benchmark: {0}")]
    InvalidBenchmark(String),

    /// The model registry could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Whether retrying the whole operation could succeed
    /// @ai:effects pure
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// @ai:intent Whether a batch orchestrator may log and skip this item
    /// @ai:effects pure
    pub fn is_skippable(&self) -> bool {
        matches!(self, Error::InvalidBenchmark(_) | Error::Connection(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
