//! Error types for the availability service.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use slotwise_engine::EngineError;

use crate::store::StoreError;

/// Failures surfaced by [`AvailabilityService`](crate::AvailabilityService).
///
/// No retries happen anywhere: the first failing read aborts the whole call
/// and partial results are never returned.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No user with the given id exists.
    #[error("tutor {0} not found")]
    NotFound(Uuid),

    /// The user exists but is not a tutor.
    #[error("user {0} is not a tutor")]
    InvalidRole(Uuid),

    /// The requested range exceeds the configured maximum length.
    #[error("date range of {requested_days} days exceeds the maximum of {limit_days}")]
    RangeTooLong {
        limit_days: i64,
        requested_days: i64,
    },

    /// A storage collaborator failed or returned corrupt data.
    #[error("availability lookup failed: {0}")]
    LookupFailed(#[from] StoreError),

    /// The storage reads did not complete within the caller's deadline.
    #[error("availability lookup exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    /// Invalid query input, e.g. a start date after the end date.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience alias used throughout slotwise-service.
pub type Result<T> = std::result::Result<T, ServiceError>;
