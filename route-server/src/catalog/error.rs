//! Stop catalog error types.

use crate::domain::StopId;

/// Errors that can occur when loading or querying the stop catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The operation needs at least one stop
    #[error("stop catalog is empty")]
    EmptyCatalog,

    /// Two stops share an id
    #[error("duplicate stop id in catalog: {0}")]
    DuplicateStop(StopId),

    /// Failed to read the catalog file
    #[error("failed to read catalog: {message}")]
    Io { message: String },

    /// Failed to parse catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
