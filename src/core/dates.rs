//! Calendar-day helpers shared by the engine and the search filter.
//!
//! Every comparison here works on whole days. Anything carrying a time of day
//! is truncated to its calendar date first, so `2024-06-10T23:59` and
//! `2024-06-10T00:00` are the same day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::iter::FusedIterator;

/// Anything a calendar widget can hand us that maps to a single day.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Exclusive day difference: `end - start` in whole days.
///
/// `day_difference(d0, d1)` is 1 for consecutive days and negative when
/// `end` precedes `start`.
pub fn day_difference(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// `true` when `day` lies in `[start, end]`, both ends included.
pub fn contains_inclusive(start: NaiveDate, end: NaiveDate, day: NaiveDate) -> bool {
    start <= day && day <= end
}

/// Closed-inclusive overlap: ranges touching on a single shared day overlap.
pub fn overlaps_inclusive(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Iterator over every day in `[start, end]`.
#[derive(Debug, Clone)]
pub struct DayIter {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DayIter {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            last: end,
        }
    }
}

impl Iterator for DayIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.last {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for DayIter {}
