//! Booked-lesson interval subtraction.
//!
//! Pure interval arithmetic: each non-cancelled lesson is removed from the
//! current candidate ranges, splitting a range in two where a lesson lands
//! inside it. Subtraction of disjoint removals is associative and
//! commutative, so the result is independent of lesson order.

use chrono::{Duration, NaiveDate};

use crate::types::{AvailabilitySlot, BookedLesson, Window, MIN_SLOT_MINUTES};

/// Remove every non-cancelled lesson's time range from `window`, anchored to
/// `date`, producing zero or more remaining slots.
///
/// Touching endpoints do not count as overlap: a lesson ending exactly when
/// the window starts (or starting exactly when it ends) leaves the window
/// untouched. A lesson fully covering a candidate range erases it. Remaining
/// ranges shorter than [`MIN_SLOT_MINUTES`] are discarded.
pub fn subtract_lessons(
    date: NaiveDate,
    window: Window,
    lessons: &[BookedLesson],
) -> Vec<AvailabilitySlot> {
    let window_start = date.and_time(window.start);
    let window_end = date.and_time(window.end);

    let mut ranges = vec![(window_start, window_end)];

    for lesson in lessons.iter().filter(|l| !l.status.is_cancelled()) {
        let mut remaining = Vec::with_capacity(ranges.len() + 1);
        for (start, end) in ranges {
            if lesson.end <= start || lesson.start >= end {
                remaining.push((start, end));
                continue;
            }
            if start < lesson.start {
                remaining.push((start, lesson.start));
            }
            if end > lesson.end {
                remaining.push((lesson.end, end));
            }
        }
        ranges = remaining;
        if ranges.is_empty() {
            break;
        }
    }

    let min_duration = Duration::minutes(MIN_SLOT_MINUTES);
    ranges
        .into_iter()
        .filter(|(start, end)| *end - *start >= min_duration)
        .map(|(start, end)| AvailabilitySlot {
            date,
            start: start.time(),
            end: end.time(),
        })
        .collect()
}
