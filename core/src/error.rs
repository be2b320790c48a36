//! Error types for the catalog client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the character does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! Every operation that touches the network returns `ApiResult<T>`: `Ok` is
//! the success case, `Err` the failure case. Nothing is thrown past the
//! client boundary; the UI layer matches on the result and renders
//! `to_string()` when it needs a message.

use thiserror::Error;

/// Outcome of a single catalog operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404 for the requested resource.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Connectivity failure, timeout, or a transport task that died.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The body parsed but could not be mapped into a domain record.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Failures translating wire records into domain records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// An episode code without at least four digits, e.g. `"S1E"`.
    #[error("malformed episode code: {0:?}")]
    MalformedEpisodeCode(String),

    /// A resource URL whose last path segment is not a numeric id.
    #[error("no numeric id at the end of {0:?}")]
    InvalidResourceUrl(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}
