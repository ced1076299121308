//! Error types for the filter builder and the API client.
//!
//! # Design
//! Filter construction problems are reported through `FilterError` as soon as
//! they can be detected, so a malformed predicate never reaches the wire.
//! `ApiError` wraps it for the client layer and adds the HTTP-facing cases.
//! `NotFound` and `Unauthorized` get dedicated variants because callers
//! frequently branch on them; every other non-2xx response lands in
//! `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors raised while building or rendering a search filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Wrong operand count for an operator, or an unusable unique-arg name.
    #[error("invalid filter argument: {0}")]
    InvalidArgument(String),

    /// A group with no children was rendered.
    #[error("invalid filter state: {0}")]
    InvalidState(String),
}

/// Errors returned by `MailClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the API key (401 or 403).
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A request parameter is outside the range the API accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}
