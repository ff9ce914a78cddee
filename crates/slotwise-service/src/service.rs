//! The availability service — the one operation callers consume.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, instrument};
use uuid::Uuid;

use slotwise_engine::{compute_availability, AvailabilitySlot, DateRange, ScheduleSnapshot};

use crate::error::{Result, ServiceError};
use crate::store::{ExceptionStore, LessonStore, UserDirectory, UserRole, WeeklyScheduleStore};

/// Computes a tutor's bookable slots over a date range.
///
/// Stateless between calls: each query resolves the tutor, loads a fresh
/// snapshot from the storage collaborators — the three schedule reads run
/// concurrently — and runs the pure engine over it. Dropping the returned
/// future cancels any in-flight reads.
pub struct AvailabilityService {
    users: Arc<dyn UserDirectory>,
    weekly: Arc<dyn WeeklyScheduleStore>,
    exceptions: Arc<dyn ExceptionStore>,
    lessons: Arc<dyn LessonStore>,
    timezone: Tz,
    max_range_days: Option<i64>,
}

impl AvailabilityService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        weekly: Arc<dyn WeeklyScheduleStore>,
        exceptions: Arc<dyn ExceptionStore>,
        lessons: Arc<dyn LessonStore>,
    ) -> Self {
        Self {
            users,
            weekly,
            exceptions,
            lessons,
            timezone: Tz::UTC,
            max_range_days: None,
        }
    }

    /// Build a service over a single backend implementing every seam.
    pub fn over<S>(store: Arc<S>) -> Self
    where
        S: UserDirectory + WeeklyScheduleStore + ExceptionStore + LessonStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Timezone used to resolve "today" and "now" for past-window filtering.
    /// Defaults to UTC.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Maximum allowed range length in days — a caller policy, off by
    /// default. The engine itself never bounds the range.
    pub fn with_max_range_days(mut self, days: i64) -> Self {
        self.max_range_days = Some(days);
        self
    }

    /// Bookable slots for `tutor_id` from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Engine`] when `start` is after `end`
    /// - [`ServiceError::RangeTooLong`] when a range policy is configured
    ///   and the request exceeds it
    /// - [`ServiceError::NotFound`] / [`ServiceError::InvalidRole`] when the
    ///   tutor cannot be resolved
    /// - [`ServiceError::LookupFailed`] when any storage read fails
    #[instrument(skip(self), level = "debug", err)]
    pub async fn get_availability(
        &self,
        tutor_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>> {
        let now = self.now();
        self.get_availability_at(tutor_id, start, end, now).await
    }

    /// Like [`get_availability`](Self::get_availability), but with an
    /// explicit current instant — for reproducible queries and tooling.
    #[instrument(skip(self), level = "debug", err)]
    pub async fn get_availability_at(
        &self,
        tutor_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Vec<AvailabilitySlot>> {
        let range = self.validated_range(start, end)?;
        let snapshot = self.load_snapshot(tutor_id, range).await?;
        Ok(compute_availability(&snapshot, range, now))
    }

    /// Like [`get_availability`](Self::get_availability), but aborts with
    /// [`ServiceError::DeadlineExceeded`] when the tutor resolution and the
    /// three schedule reads do not complete within `deadline`.
    #[instrument(skip(self), level = "debug", err)]
    pub async fn get_availability_within(
        &self,
        tutor_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        deadline: Duration,
    ) -> Result<Vec<AvailabilitySlot>> {
        let now = self.now();
        let range = self.validated_range(start, end)?;
        let snapshot = tokio::time::timeout(deadline, self.load_snapshot(tutor_id, range))
            .await
            .map_err(|_| ServiceError::DeadlineExceeded(deadline))??;
        Ok(compute_availability(&snapshot, range, now))
    }

    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    fn validated_range(&self, start: NaiveDate, end: NaiveDate) -> Result<DateRange> {
        let range = DateRange::new(start, end)?;
        if let Some(limit_days) = self.max_range_days {
            let requested_days = range.len_days();
            if requested_days > limit_days {
                return Err(ServiceError::RangeTooLong {
                    limit_days,
                    requested_days,
                });
            }
        }
        Ok(range)
    }

    /// Resolve the tutor, then issue the three schedule reads concurrently.
    /// The first failure aborts the call; partial reads are never used.
    async fn load_snapshot(&self, tutor_id: Uuid, range: DateRange) -> Result<ScheduleSnapshot> {
        let account = self
            .users
            .get_user(tutor_id)
            .await?
            .ok_or(ServiceError::NotFound(tutor_id))?;
        if account.role != UserRole::Tutor {
            return Err(ServiceError::InvalidRole(tutor_id));
        }

        let (weekly, exceptions, lessons) = tokio::try_join!(
            self.weekly.list_weekly_entries(tutor_id),
            self.exceptions.list_exceptions(tutor_id, range),
            self.lessons.list_lessons(tutor_id, range),
        )?;

        debug!(
            weekly = weekly.len(),
            exceptions = exceptions.len(),
            lessons = lessons.len(),
            "schedule snapshot loaded"
        );

        Ok(ScheduleSnapshot {
            weekly,
            exceptions,
            lessons,
        })
    }
}
