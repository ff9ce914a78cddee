//! Availability computation across a date range.
//!
//! The engine is a pure function of a schedule snapshot, a date range, and
//! the current wall-clock instant: per day it materializes open windows,
//! subtracts booked lessons, and filters windows already begun on the
//! current date. Days are processed in ascending order and slots within a
//! day are emitted in ascending start-time order, so two calls over the same
//! data produce identical output.

use chrono::NaiveDateTime;

use crate::subtract::subtract_lessons;
use crate::types::{AvailabilitySlot, BookedLesson, DateRange, ScheduleException, WeeklyEntry};
use crate::window::day_windows;

/// The three pre-loaded inputs the engine computes over.
///
/// One snapshot per call: the engine never re-reads mid-computation, so a
/// concurrent schedule mutation cannot be half-observed. Lessons may include
/// cancelled ones; subtraction skips them.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    pub weekly: Vec<WeeklyEntry>,
    pub exceptions: Vec<ScheduleException>,
    pub lessons: Vec<BookedLesson>,
}

/// Compute every bookable slot in `range`, given the current instant `now`.
///
/// On `now`'s own date, a slot survives only when its start time is strictly
/// after the current time — an already-begun window is dropped whole, not
/// trimmed. Slots on other dates are never filtered by the clock.
///
/// The result is a flat sequence ordered by date, then start time. An empty
/// range of open time yields an empty vector, never an absent value.
pub fn compute_availability(
    snapshot: &ScheduleSnapshot,
    range: DateRange,
    now: NaiveDateTime,
) -> Vec<AvailabilitySlot> {
    let mut slots = Vec::new();
    for date in range.days() {
        for window in day_windows(date, &snapshot.weekly, &snapshot.exceptions) {
            for slot in subtract_lessons(date, window, &snapshot.lessons) {
                if date == now.date() && slot.start <= now.time() {
                    continue;
                }
                slots.push(slot);
            }
        }
    }
    slots
}
