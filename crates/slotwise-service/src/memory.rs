//! In-memory store backing tests and the CLI.
//!
//! Holds a whole schedule document behind an `RwLock` and implements every
//! storage seam over it. Loading a document goes through the validated
//! domain types, so a malformed record (a `9:00` time, a day-of-week of 7)
//! is a [`StoreError::CorruptRecord`], never a silent skip.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use slotwise_engine::{BookedLesson, DateRange, ScheduleException, WeeklyEntry};

use crate::store::{
    ExceptionStore, LessonStore, StoreError, UserAccount, UserDirectory, WeeklyScheduleStore,
};

/// Canonical JSON document for a full schedule data set: user accounts plus
/// the three schedule collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub weekly: Vec<WeeklyEntry>,
    #[serde(default)]
    pub exceptions: Vec<ScheduleException>,
    #[serde(default)]
    pub lessons: Vec<BookedLesson>,
}

/// An in-memory schedule store.
#[derive(Debug, Default)]
pub struct InMemorySchedule {
    data: RwLock<ScheduleDocument>,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: ScheduleDocument) -> Self {
        Self {
            data: RwLock::new(document),
        }
    }

    /// Parse a schedule document from JSON. Validation failures inside the
    /// document surface as [`StoreError::CorruptRecord`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: ScheduleDocument = serde_json::from_str(json).map_err(|e| {
            tracing::error!(error = %e, "rejecting schedule document");
            StoreError::CorruptRecord(e.to_string())
        })?;
        Ok(Self::from_document(document))
    }

    pub fn add_user(&self, account: UserAccount) -> Result<(), StoreError> {
        self.write()?.users.push(account);
        Ok(())
    }

    pub fn add_weekly_entry(&self, entry: WeeklyEntry) -> Result<(), StoreError> {
        self.write()?.weekly.push(entry);
        Ok(())
    }

    pub fn add_exception(&self, exception: ScheduleException) -> Result<(), StoreError> {
        self.write()?.exceptions.push(exception);
        Ok(())
    }

    pub fn add_lesson(&self, lesson: BookedLesson) -> Result<(), StoreError> {
        self.write()?.lessons.push(lesson);
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, ScheduleDocument>, StoreError> {
        self.data
            .read()
            .map_err(|_| StoreError::Backend("schedule lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, ScheduleDocument>, StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Backend("schedule lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserDirectory for InMemorySchedule {
    async fn get_user(&self, id: Uuid) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).copied())
    }
}

#[async_trait]
impl WeeklyScheduleStore for InMemorySchedule {
    async fn list_weekly_entries(&self, tutor_id: Uuid) -> Result<Vec<WeeklyEntry>, StoreError> {
        Ok(self
            .read()?
            .weekly
            .iter()
            .filter(|w| w.tutor_id == tutor_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl ExceptionStore for InMemorySchedule {
    async fn list_exceptions(
        &self,
        tutor_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<ScheduleException>, StoreError> {
        Ok(self
            .read()?
            .exceptions
            .iter()
            .filter(|e| e.tutor_id == tutor_id && range.contains(e.date))
            .copied()
            .collect())
    }
}

#[async_trait]
impl LessonStore for InMemorySchedule {
    async fn list_lessons(
        &self,
        tutor_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<BookedLesson>, StoreError> {
        Ok(self
            .read()?
            .lessons
            .iter()
            .filter(|l| {
                l.tutor_id == tutor_id
                    && l.start.date() <= range.end()
                    && l.end.date() >= range.start()
            })
            .copied()
            .collect())
    }
}
