//! Wall-clock time to vertical pixel mapping.
//!
//! A day column is `density × 1440` pixels tall; an instant sits at
//! `minutes_from_midnight × density`, rounded to the nearest pixel.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::config::MINUTES_PER_DAY;

/// Minutes elapsed since local midnight, including fractional seconds.
pub fn minutes_from_midnight(time: NaiveTime) -> f64 {
    let whole = f64::from(time.hour() * 60 + time.minute());
    let seconds = f64::from(time.second()) + f64::from(time.nanosecond()) / 1e9;
    whole + seconds / 60.0
}

/// Maps times of day onto a column at a fixed pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMapper {
    density: f64,
}

impl TimeMapper {
    /// `density` is in pixels per minute and is expected to be already clamped.
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Full 24-hour pixel extent of a column.
    pub fn day_height(&self) -> i32 {
        self.offset_for_minutes(f64::from(MINUTES_PER_DAY))
    }

    pub fn offset_for_minutes(&self, minutes: f64) -> i32 {
        (minutes * self.density).round() as i32
    }

    pub fn offset_for_time(&self, time: NaiveTime) -> i32 {
        self.offset_for_minutes(minutes_from_midnight(time))
    }

    pub fn offset(&self, instant: NaiveDateTime) -> i32 {
        self.offset_for_time(instant.time())
    }

    /// Offset of the "current time" line within the column for `date`, or
    /// `None` when `now` falls on another day.
    pub fn now_indicator(&self, now: NaiveDateTime, date: NaiveDate) -> Option<i32> {
        (now.date() == date).then(|| self.offset(now))
    }
}
