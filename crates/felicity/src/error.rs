//! Error types for the Felicity library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Felicity operations.
#[derive(Debug, Error)]
pub enum FelicityError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A required canonical column could not be resolved for a year.
    ///
    /// Fatal for that year's load: downstream aggregates depend on a
    /// complete canonical table, so the load aborts rather than
    /// continuing without a score column.
    #[error("Schema error for year {year}: {message}")]
    Schema { year: u16, message: String },

    /// The regression model artifact could not be fetched or deserialized.
    ///
    /// Non-fatal to the rest of the dashboard; only the predictor is
    /// disabled for the session.
    #[error("Prediction model unavailable: {0}")]
    ModelUnavailable(String),

    /// The caller supplied an incomplete feature vector.
    #[error("Feature mismatch: missing {missing:?}")]
    FeatureMismatch { missing: Vec<String> },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Felicity operations.
pub type Result<T> = std::result::Result<T, FelicityError>;
