//! Storage collaborator seams.
//!
//! The availability service reads four external collections: the user
//! directory, weekly schedule entries, schedule exceptions, and booked
//! lessons. Each is an async trait so any backend can be plugged in. The
//! service issues one read per store per call and computes over that
//! snapshot; cross-store read-skew under concurrent mutation is accepted as
//! a documented limitation rather than hidden behind a transaction the
//! collaborators may not share.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use slotwise_engine::{BookedLesson, DateRange, ScheduleException, WeeklyEntry};

/// Failure surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not serve the read.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The backend holds a record the schedule model rejects (e.g. a legacy
    /// malformed time string). Surfaced as an error, never silently skipped,
    /// so a corrupted schedule cannot masquerade as an empty one.
    #[error("corrupt schedule record: {0}")]
    CorruptRecord(String),
}

/// Account role, as recorded by the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Tutor,
    Student,
}

/// The minimal account view the availability service needs for its role
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub role: UserRole,
}

/// Resolves user ids to accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up an account by id. `Ok(None)` when no such user exists.
    async fn get_user(&self, id: Uuid) -> Result<Option<UserAccount>, StoreError>;
}

/// Persists recurring weekly availability entries per tutor.
#[async_trait]
pub trait WeeklyScheduleStore: Send + Sync {
    /// All recurring weekly entries owned by the tutor.
    async fn list_weekly_entries(&self, tutor_id: Uuid) -> Result<Vec<WeeklyEntry>, StoreError>;
}

/// Persists date-specific schedule overrides per tutor.
#[async_trait]
pub trait ExceptionStore: Send + Sync {
    /// The tutor's exceptions whose dates fall inside `range`.
    async fn list_exceptions(
        &self,
        tutor_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<ScheduleException>, StoreError>;
}

/// Persists booked lessons with status and time range.
#[async_trait]
pub trait LessonStore: Send + Sync {
    /// The tutor's booked lessons overlapping `range`. May include cancelled
    /// lessons; the engine filters them out during subtraction.
    async fn list_lessons(
        &self,
        tutor_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<BookedLesson>, StoreError>;
}
