//! Day window materialization — weekly entries plus date exceptions.
//!
//! For one calendar day, seeds open windows from the weekly entries matching
//! that day of week, then overlays the day's exceptions. The working
//! collection is a `BTreeMap` keyed by window start time, so output order is
//! ascending by construction and key collisions resolve last-write-wins: a
//! duplicate weekly start, or an addition sharing a start with a weekly
//! window, silently replaces the earlier one.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::types::{ExceptionKind, ScheduleException, WeeklyEntry, Window};

/// Raw open windows for `date`, before lesson subtraction.
///
/// A full-day removal exception short-circuits to the empty set — weekly
/// entries and other exceptions on the date are not evaluated. Exceptions
/// are applied in input order; a partial removal whose start time matches no
/// window is a no-op.
///
/// Returned windows are sorted by ascending start time. Strictly overlapping
/// windows are coalesced so downstream subtraction cannot emit overlapping
/// slots; windows that merely touch stay separate.
pub fn day_windows(
    date: NaiveDate,
    weekly: &[WeeklyEntry],
    exceptions: &[ScheduleException],
) -> Vec<Window> {
    let day_exceptions: Vec<&ScheduleException> =
        exceptions.iter().filter(|e| e.date == date).collect();

    if day_exceptions
        .iter()
        .any(|e| matches!(e.kind, ExceptionKind::RemoveDay))
    {
        return Vec::new();
    }

    let weekday = date.weekday();
    let mut windows: BTreeMap<NaiveTime, NaiveTime> = BTreeMap::new();
    for entry in weekly.iter().filter(|w| w.weekday == weekday) {
        windows.insert(entry.start, entry.end);
    }

    for exception in &day_exceptions {
        match exception.kind {
            ExceptionKind::AddWindow { start, end } => {
                windows.insert(start, end);
            }
            ExceptionKind::RemoveWindow { start, .. } => {
                windows.remove(&start);
            }
            // Handled by the short-circuit above.
            ExceptionKind::RemoveDay => {}
        }
    }

    coalesce(windows)
}

/// Merge strictly overlapping windows, keeping touching windows separate.
fn coalesce(windows: BTreeMap<NaiveTime, NaiveTime>) -> Vec<Window> {
    let mut merged: Vec<Window> = Vec::with_capacity(windows.len());
    for (start, end) in windows {
        if let Some(last) = merged.last_mut() {
            if start < last.end {
                last.end = last.end.max(end);
                continue;
            }
        }
        merged.push(Window { start, end });
    }
    merged
}
