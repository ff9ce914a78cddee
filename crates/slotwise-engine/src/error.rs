//! Error types for schedule validation and availability queries.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Errors raised while validating schedule data or an availability query.
///
/// Every variant except [`EngineError::InvalidRange`] is surfaced at write
/// time — a value that exists in the typed model is a value the engine can
/// compute over, so the computation itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested start date is after the end date.
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A schedule time was not in strict zero-padded `HH:MM` form.
    #[error("invalid time format: {0:?} (expected zero-padded HH:MM)")]
    InvalidTimeFormat(String),

    /// A day-of-week index outside `0..=6`.
    #[error("invalid day of week: {0} (expected 0=Sunday through 6=Saturday)")]
    InvalidDayOfWeek(u8),

    /// A schedule time carried seconds or finer precision.
    #[error("time {0} is not on a minute boundary")]
    SubMinuteTime(NaiveTime),

    /// A window whose start does not precede its end.
    #[error("window start {start} is not before its end {end}")]
    EmptyWindow { start: NaiveTime, end: NaiveTime },

    /// A lesson whose start does not precede its end.
    #[error("lesson start {start} is not before its end {end}")]
    EmptyLesson {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A schedule exception with an inconsistent shape (e.g. only one of
    /// start/end provided, or an addition without times).
    #[error("invalid schedule exception: {0}")]
    InvalidException(String),
}

/// Convenience alias used throughout slotwise-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
