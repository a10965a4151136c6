//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from catalog, storage and HTTP errors.

use super::{InvalidId, StopId, TimeError};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An identifier failed validation
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// A timetable entry failed validation
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// A timetable entry refers to a stop the route does not visit
    #[error("stop {0} is not on this route")]
    StopNotOnRoute(StopId),
}
