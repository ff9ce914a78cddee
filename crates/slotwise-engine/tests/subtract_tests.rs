//! Tests for booked-lesson interval subtraction.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use slotwise_engine::{subtract_lessons, BookedLesson, LessonStatus, Window};

fn tutor() -> Uuid {
    Uuid::from_u128(1)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_time(time(h, m))
}

fn window(start: (u32, u32), end: (u32, u32)) -> Window {
    Window {
        start: time(start.0, start.1),
        end: time(end.0, end.1),
    }
}

fn lesson(start: NaiveDateTime, end: NaiveDateTime, status: LessonStatus) -> BookedLesson {
    BookedLesson::new(tutor(), start, end, status).unwrap()
}

/// 2030-06-03 is a Monday.
fn monday() -> NaiveDate {
    date(2030, 6, 3)
}

fn slot_times(slots: &[slotwise_engine::AvailabilitySlot]) -> Vec<(NaiveTime, NaiveTime)> {
    slots.iter().map(|s| (s.start, s.end)).collect()
}

#[test]
fn no_lessons_keeps_the_whole_window() {
    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &[]);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(19, 0))]);
    assert_eq!(slots[0].date, monday());
}

#[test]
fn mid_window_lesson_splits_in_two() {
    let lessons = vec![lesson(
        at(monday(), 16, 0),
        at(monday(), 17, 0),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(
        slot_times(&slots),
        vec![(time(15, 0), time(16, 0)), (time(17, 0), time(19, 0))]
    );
}

#[test]
fn covering_lesson_erases_the_window() {
    let lessons = vec![lesson(
        at(monday(), 15, 0),
        at(monday(), 19, 0),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert!(slots.is_empty());
}

#[test]
fn overhanging_lesson_clips_the_start() {
    let lessons = vec![lesson(
        at(monday(), 14, 0),
        at(monday(), 16, 0),
        LessonStatus::Scheduled,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(16, 0), time(19, 0))]);
}

#[test]
fn overhanging_lesson_clips_the_end() {
    let lessons = vec![lesson(
        at(monday(), 18, 0),
        at(monday(), 20, 0),
        LessonStatus::InProgress,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(18, 0))]);
}

#[test]
fn touching_lessons_do_not_subtract() {
    // One lesson ends exactly at window start, another begins exactly at
    // window end: neither overlaps.
    let lessons = vec![
        lesson(at(monday(), 14, 0), at(monday(), 15, 0), LessonStatus::Done),
        lesson(
            at(monday(), 19, 0),
            at(monday(), 20, 0),
            LessonStatus::Confirmed,
        ),
    ];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(19, 0))]);
}

#[test]
fn cancelled_lessons_are_ignored() {
    let lessons = vec![lesson(
        at(monday(), 16, 0),
        at(monday(), 17, 0),
        LessonStatus::Cancelled,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(19, 0))]);
}

#[test]
fn multiple_lessons_split_into_multiple_slots() {
    let lessons = vec![
        lesson(
            at(monday(), 16, 0),
            at(monday(), 16, 30),
            LessonStatus::Confirmed,
        ),
        lesson(
            at(monday(), 17, 30),
            at(monday(), 18, 0),
            LessonStatus::Scheduled,
        ),
    ];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(
        slot_times(&slots),
        vec![
            (time(15, 0), time(16, 0)),
            (time(16, 30), time(17, 30)),
            (time(18, 0), time(19, 0)),
        ]
    );
}

#[test]
fn result_is_independent_of_lesson_order() {
    let a = lesson(
        at(monday(), 16, 0),
        at(monday(), 16, 30),
        LessonStatus::Confirmed,
    );
    let b = lesson(
        at(monday(), 17, 30),
        at(monday(), 18, 0),
        LessonStatus::Scheduled,
    );

    let forward = subtract_lessons(monday(), window((15, 0), (19, 0)), &[a, b]);
    let reverse = subtract_lessons(monday(), window((15, 0), (19, 0)), &[b, a]);

    assert_eq!(slot_times(&forward), slot_times(&reverse));
}

#[test]
fn remainder_shorter_than_minimum_is_discarded() {
    // Lesson leaves a 10-minute head: 15:00-15:10 is below the 15-minute
    // minimum and must not be offered.
    let lessons = vec![lesson(
        at(monday(), 15, 10),
        at(monday(), 19, 0),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert!(slots.is_empty());
}

#[test]
fn remainder_of_exactly_minimum_duration_survives() {
    let lessons = vec![lesson(
        at(monday(), 15, 15),
        at(monday(), 19, 0),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(15, 15))]);
}

#[test]
fn overnight_lesson_from_previous_day_clips_the_morning() {
    // A lesson running past midnight into this date still subtracts.
    let lessons = vec![lesson(
        at(date(2030, 6, 2), 23, 0),
        at(monday(), 9, 30),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((9, 0), (12, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(9, 30), time(12, 0))]);
}

#[test]
fn lessons_on_other_days_do_not_affect_the_window() {
    let lessons = vec![lesson(
        at(date(2030, 6, 4), 16, 0),
        at(date(2030, 6, 4), 17, 0),
        LessonStatus::Confirmed,
    )];

    let slots = subtract_lessons(monday(), window((15, 0), (19, 0)), &lessons);

    assert_eq!(slot_times(&slots), vec![(time(15, 0), time(19, 0))]);
}
