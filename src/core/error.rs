//! Error types for biome filtering

use thiserror::Error;

/// Main error type for the crate.
///
/// Only configuration loading and validation produce errors. Biome selection
/// and column flattening are fail-open and never return one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: String,
    },

    #[error("Invalid biome identifier: {0:?}")]
    InvalidBiomeId(String),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
