//! Time utilities: parsing HH:MM and formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// "HH:MM" length of an interval, e.g. `00:30`.
pub fn format_span(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let m = (end - start).num_minutes();
    let sign = if m < 0 { "-" } else { "" };
    let m = m.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
