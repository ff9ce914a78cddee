//! Validated schedule domain types and their canonical serde shapes.
//!
//! Canonical wire formats: dates are `YYYY-MM-DD`, times are zero-padded
//! `HH:MM`, day-of-week is an integer `0..=6` with 0 = Sunday, lesson status
//! is a lowercase string. Every constructor validates at write time, so a
//! value that exists is a value the engine can compute over — there is no
//! read-time parsing that could silently skip malformed records.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Minimum bookable slot duration in minutes. Remaining ranges shorter than
/// this are discarded after lesson subtraction.
pub const MIN_SLOT_MINUTES: i64 = 15;

/// Parse a wall-clock time in strict zero-padded `HH:MM` form.
///
/// Lexicographic comparison of schedule times is only meaningful because
/// every stored time is exactly five characters; anything looser (missing
/// zero padding, seconds, stray whitespace) is rejected here.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let b = s.as_bytes();
    let well_formed = b.len() == 5
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit();
    if !well_formed {
        return Err(EngineError::InvalidTimeFormat(s.to_string()));
    }
    let hour = u32::from(b[0] - b'0') * 10 + u32::from(b[1] - b'0');
    let minute = u32::from(b[3] - b'0') * 10 + u32::from(b[4] - b'0');
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| EngineError::InvalidTimeFormat(s.to_string()))
}

/// Format a wall-clock time as zero-padded `HH:MM`.
pub fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Convert a `0..=6` index (0 = Sunday) into a weekday.
pub fn weekday_from_index(day: u8) -> Result<Weekday> {
    match day {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(EngineError::InvalidDayOfWeek(other)),
    }
}

/// Convert a weekday into its `0..=6` index (0 = Sunday).
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

fn validate_minute_granularity(t: NaiveTime) -> Result<NaiveTime> {
    if t.second() != 0 || t.nanosecond() != 0 {
        return Err(EngineError::SubMinuteTime(t));
    }
    Ok(t)
}

fn validate_window(start: NaiveTime, end: NaiveTime) -> Result<()> {
    validate_minute_granularity(start)?;
    validate_minute_granularity(end)?;
    if start >= end {
        return Err(EngineError::EmptyWindow { start, end });
    }
    Ok(())
}

/// Serde adapter for `NaiveTime` fields carried as `HH:MM` strings.
pub(crate) mod hhmm {
    use super::{format_hhmm, parse_hhmm};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_hhmm(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Weekday` fields carried as `0..=6` integers (0 = Sunday).
pub(crate) mod weekday_num {
    use super::{weekday_from_index, weekday_index};
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(w: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday_index(*w))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let day = u8::deserialize(deserializer)?;
        weekday_from_index(day).map_err(serde::de::Error::custom)
    }
}

/// A recurring availability window tied to a day of week, independent of any
/// calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeeklyEntry")]
pub struct WeeklyEntry {
    pub tutor_id: Uuid,
    #[serde(rename = "day_of_week", with = "weekday_num")]
    pub weekday: Weekday,
    #[serde(rename = "start_time", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(rename = "end_time", with = "hhmm")]
    pub end: NaiveTime,
}

impl WeeklyEntry {
    /// Build a weekly entry, rejecting windows whose start is not strictly
    /// before their end or whose times are finer than minute granularity.
    pub fn new(tutor_id: Uuid, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        validate_window(start, end)?;
        Ok(Self {
            tutor_id,
            weekday,
            start,
            end,
        })
    }
}

#[derive(Deserialize)]
struct RawWeeklyEntry {
    tutor_id: Uuid,
    day_of_week: u8,
    start_time: String,
    end_time: String,
}

impl TryFrom<RawWeeklyEntry> for WeeklyEntry {
    type Error = EngineError;

    fn try_from(raw: RawWeeklyEntry) -> Result<Self> {
        WeeklyEntry::new(
            raw.tutor_id,
            weekday_from_index(raw.day_of_week)?,
            parse_hhmm(&raw.start_time)?,
            parse_hhmm(&raw.end_time)?,
        )
    }
}

/// The shape of a date-specific schedule override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// The tutor is entirely unavailable on the date, regardless of weekly
    /// entries or other exceptions.
    RemoveDay,
    /// Remove the window whose start time matches `start` exactly. Removing
    /// a window that does not exist is a no-op, not an error.
    RemoveWindow { start: NaiveTime, end: NaiveTime },
    /// Grant an extra window on the date, overriding any existing window
    /// with the same start time.
    AddWindow { start: NaiveTime, end: NaiveTime },
}

/// A calendar-date-specific override to the weekly pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawException")]
pub struct ScheduleException {
    pub tutor_id: Uuid,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

impl ScheduleException {
    /// Full-day removal: the tutor is unavailable for the whole date.
    pub fn remove_day(tutor_id: Uuid, date: NaiveDate) -> Self {
        Self {
            tutor_id,
            date,
            kind: ExceptionKind::RemoveDay,
        }
    }

    /// Partial removal of the window starting at `start`.
    pub fn remove_window(
        tutor_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        validate_window(start, end)?;
        Ok(Self {
            tutor_id,
            date,
            kind: ExceptionKind::RemoveWindow { start, end },
        })
    }

    /// Extra window granted on `date`.
    pub fn add_window(
        tutor_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        validate_window(start, end)?;
        Ok(Self {
            tutor_id,
            date,
            kind: ExceptionKind::AddWindow { start, end },
        })
    }
}

/// Wire shape of an exception: `start_time`/`end_time` are both absent (or
/// empty) for a full-day removal, and must be provided together otherwise.
#[derive(Serialize, Deserialize)]
struct RawException {
    tutor_id: Uuid,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
    is_removal: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl TryFrom<RawException> for ScheduleException {
    type Error = EngineError;

    fn try_from(raw: RawException) -> Result<Self> {
        let start = non_empty(raw.start_time);
        let end = non_empty(raw.end_time);
        match (start, end, raw.is_removal) {
            (None, None, true) => Ok(ScheduleException::remove_day(raw.tutor_id, raw.date)),
            (Some(s), Some(e), true) => ScheduleException::remove_window(
                raw.tutor_id,
                raw.date,
                parse_hhmm(&s)?,
                parse_hhmm(&e)?,
            ),
            (Some(s), Some(e), false) => ScheduleException::add_window(
                raw.tutor_id,
                raw.date,
                parse_hhmm(&s)?,
                parse_hhmm(&e)?,
            ),
            (None, None, false) => Err(EngineError::InvalidException(
                "an addition requires both start_time and end_time".to_string(),
            )),
            _ => Err(EngineError::InvalidException(
                "start_time and end_time must be provided together".to_string(),
            )),
        }
    }
}

impl From<&ScheduleException> for RawException {
    fn from(exception: &ScheduleException) -> Self {
        let (start_time, end_time, is_removal) = match exception.kind {
            ExceptionKind::RemoveDay => (None, None, true),
            ExceptionKind::RemoveWindow { start, end } => {
                (Some(format_hhmm(start)), Some(format_hhmm(end)), true)
            }
            ExceptionKind::AddWindow { start, end } => {
                (Some(format_hhmm(start)), Some(format_hhmm(end)), false)
            }
        };
        Self {
            tutor_id: exception.tutor_id,
            date: exception.date,
            start_time,
            end_time,
            is_removal,
        }
    }
}

impl Serialize for ScheduleException {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RawException::from(self).serialize(serializer)
    }
}

/// Lifecycle status of a booked lesson. Only non-cancelled lessons block
/// availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Done,
    Failed,
    Cancelled,
}

impl LessonStatus {
    pub fn is_cancelled(self) -> bool {
        self == LessonStatus::Cancelled
    }
}

/// A booked lesson with an absolute time range. Owned by the lesson
/// lifecycle; the engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLesson")]
pub struct BookedLesson {
    pub tutor_id: Uuid,
    #[serde(rename = "start_time")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_time")]
    pub end: NaiveDateTime,
    pub status: LessonStatus,
}

impl BookedLesson {
    pub fn new(
        tutor_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: LessonStatus,
    ) -> Result<Self> {
        if start >= end {
            return Err(EngineError::EmptyLesson { start, end });
        }
        Ok(Self {
            tutor_id,
            start,
            end,
            status,
        })
    }
}

#[derive(Deserialize)]
struct RawLesson {
    tutor_id: Uuid,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    status: LessonStatus,
}

impl TryFrom<RawLesson> for BookedLesson {
    type Error = EngineError;

    fn try_from(raw: RawLesson) -> Result<Self> {
        BookedLesson::new(raw.tutor_id, raw.start_time, raw.end_time, raw.status)
    }
}

/// An intermediate open time range on some day, before lesson subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A final bookable slot on a specific date. Produced fresh on every query;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    #[serde(rename = "start_time", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(rename = "end_time", with = "hhmm")]
    pub end: NaiveTime,
}

impl AvailabilitySlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, failing with [`EngineError::InvalidRange`] when the
    /// start date falls after the end date. A single-day range is valid.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate the covered dates in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
