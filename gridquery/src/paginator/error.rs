//! Paginator errors

use thiserror::Error;

use crate::data::error::DataError;

/// Invalid column registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Column at position {position} has an empty id")]
    EmptyId { position: usize },

    #[error("Column id '{0}' is declared more than once")]
    DuplicateId(String),
}

/// Request fields that cannot be turned into a table request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid JSON in '{param}': {source}")]
    InvalidJson {
        param: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid parameter '{param}': {message}")]
    InvalidParam {
        param: &'static str,
        message: String,
    },
}

impl RequestError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson { .. } => "INVALID_REQUEST_JSON",
            Self::InvalidParam { .. } => "INVALID_REQUEST_PARAM",
        }
    }
}

/// Errors surfaced while building a response
#[derive(Debug, Error)]
pub enum PaginatorError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Data(#[from] DataError),
}
