//! Error types for Data API calls.

use std::fmt;
use thiserror::Error;

use super::transport::TransportError;

/// Errors from a single Data API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered 404 for an addressed record.
    #[error("could not find {what} with ID '{id}'")]
    NotFound { what: &'static str, id: String },

    /// Any other non-success status.
    #[error("got error response, raw dump:\n{dump}")]
    Status { status: u16, dump: String },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {source}\nraw dump:\n{dump}")]
    Decode {
        dump: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The caller cancelled before the request was sent.
    #[error("operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Returns true for the "record does not exist" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// The HTTP status, when the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for single-call operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// A paginated fetch that stopped early.
///
/// Items from the pages that succeeded are kept, in order.
#[derive(Debug)]
pub struct PartialFetch<E> {
    pub items: Vec<E>,
    pub error: ApiError,
}

impl<E> fmt::Display for PartialFetch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch stopped after {} item(s)", self.items.len())
    }
}

impl<E: fmt::Debug> std::error::Error for PartialFetch<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result type for paginated fetches.
pub type FetchResult<E> = Result<Vec<E>, PartialFetch<E>>;
