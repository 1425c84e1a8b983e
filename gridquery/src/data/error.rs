//! Unified error type for data layer
//!
//! Wraps backend-specific errors so the paginator can surface them without
//! knowing which backend produced them.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// DuckDB database error
    #[cfg(feature = "duckdb")]
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    /// Row source could not be decoded
    #[error("Invalid row data: {0}")]
    Json(#[from] serde_json::Error),

    /// Row source is not a list of objects
    #[error("Invalid row at position {position}: expected a JSON object")]
    InvalidRow { position: usize },

    /// Query cannot be executed by this backend
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "duckdb")]
            Self::Duckdb(_) => "duckdb",
            Self::Json(_) | Self::InvalidRow { .. } => "memory",
            Self::InvalidQuery(_) | Self::Io(_) => "unknown",
        }
    }
}
