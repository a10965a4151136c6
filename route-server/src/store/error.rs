//! Route storage and route book error types.

use crate::domain::{DomainError, RouteId};

/// Errors from reading or writing the persisted route list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// The stored routes could not be (de)serialized
    #[error("storage JSON error: {message}")]
    Json { message: String },
}

/// Errors from editing routes in a [`RouteBook`](super::RouteBook).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route has this id
    #[error("route {0} not found")]
    NotFound(RouteId),

    /// The edit was rejected by the route itself
    #[error(transparent)]
    Domain(#[from] DomainError),
}
