//! # slotwise-engine
//!
//! Deterministic availability computation for tutor schedules.
//!
//! Merges a recurring weekly schedule, date-specific exceptions (additions,
//! partial removals, full-day removals), and booked lessons into the final
//! list of open, minimum-duration slots for a date range. All computation is
//! pure: the engine holds no state and performs no I/O — callers load the
//! schedule data and hand the engine a [`ScheduleSnapshot`].
//!
//! ## Modules
//!
//! - [`types`] — validated schedule domain types and canonical serde shapes
//! - [`window`] — weekly entries + exceptions → open windows for one day
//! - [`subtract`] — booked-lesson interval subtraction
//! - [`availability`] — orchestration across a date range
//! - [`error`] — error types

pub mod availability;
pub mod error;
pub mod subtract;
pub mod types;
pub mod window;

pub use availability::{compute_availability, ScheduleSnapshot};
pub use error::EngineError;
pub use subtract::subtract_lessons;
pub use types::{
    AvailabilitySlot, BookedLesson, DateRange, ExceptionKind, LessonStatus, ScheduleException,
    WeeklyEntry, Window, MIN_SLOT_MINUTES,
};
pub use window::day_windows;
