//! Business-day policy: which days are tracked and how instants are rounded.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::ops::Deref;

/// A timestamp rounded down to the current or previous half-hour boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackedInstant(NaiveDateTime);

impl Deref for TrackedInstant {
    type Target = NaiveDateTime;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Monday through Friday.
pub fn is_tracked_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn round_down_to_half_hour(instant: NaiveDateTime) -> TrackedInstant {
    let minute = if instant.minute() >= 30 { 30 } else { 0 };
    let time = instant
        .time()
        .with_minute(minute)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant.time());
    TrackedInstant(instant.date().and_time(time))
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
