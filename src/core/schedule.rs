//! Checkpoint table and the per-day cursor that decides what is due.

use crate::errors::AppResult;
use crate::models::time_of_day::TimeOfDay;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Ordered, duplicate-free set of daily checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleTable {
    checkpoints: Vec<TimeOfDay>,
}

impl ScheduleTable {
    pub fn new(mut checkpoints: Vec<TimeOfDay>) -> Self {
        checkpoints.sort_unstable();
        checkpoints.dedup();
        Self { checkpoints }
    }

    /// Every half hour from `first` to `last`, both included.
    pub fn every_half_hour(first: TimeOfDay, last: TimeOfDay) -> AppResult<Self> {
        let mut out = Vec::new();
        let mut minutes = first.hour() * 60 + first.minute();
        let end = last.hour() * 60 + last.minute();
        while minutes <= end {
            out.push(TimeOfDay::new(minutes / 60, minutes % 60)?);
            minutes += 30;
        }
        Ok(Self::new(out))
    }

    /// Default business-hours table: 09:30 through 17:30.
    pub fn business_hours() -> Self {
        TimeOfDay::new(9, 30)
            .and_then(|first| Self::every_half_hour(first, TimeOfDay::new(17, 30)?))
            .unwrap_or_default()
    }

    pub fn checkpoints(&self) -> &[TimeOfDay] {
        &self.checkpoints
    }

    /// Checkpoints in `(last_checked, now]`, ascending. `None` stands for
    /// "before the earliest checkpoint".
    pub fn due_checkpoints(&self, last_checked: Option<TimeOfDay>, now: TimeOfDay) -> Vec<TimeOfDay> {
        self.checkpoints
            .iter()
            .copied()
            .filter(|cp| last_checked.is_none_or(|last| *cp > last) && *cp <= now)
            .collect()
    }

    /// Earliest checkpoint strictly after `now`, today only.
    pub fn next_checkpoint(&self, now: TimeOfDay) -> Option<TimeOfDay> {
        self.checkpoints.iter().copied().find(|cp| *cp > now)
    }
}

/// How far a single calendar day got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DayMark {
    last_checked: Option<TimeOfDay>,
    last_fired: Option<TimeOfDay>,
}

impl DayMark {
    /// `max(last polled, last fired)`: nothing at or before it fires again.
    fn floor(&self) -> Option<TimeOfDay> {
        match (self.last_checked, self.last_fired) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Other days remembered besides the current one; the farthest go first.
const HISTORY_DAYS: usize = 7;

/// Remembers, per calendar day, where the last poll stood and the last
/// checkpoint that actually fired. Switching dates parks the current day's
/// mark and resumes the new date's mark if that date was polled before.
#[derive(Debug, Clone, Default)]
pub struct CheckpointCursor {
    day: Option<NaiveDate>,
    mark: DayMark,
    history: BTreeMap<NaiveDate, DayMark>,
}

impl CheckpointCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor that treats everything up to `now` as already handled, so
    /// the first poll fires nothing that elapsed before start-up.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            day: Some(now.date()),
            mark: DayMark {
                last_checked: Some(TimeOfDay::of(&now)),
                last_fired: None,
            },
            history: BTreeMap::new(),
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    pub fn last_fired(&self) -> Option<TimeOfDay> {
        self.mark.last_fired
    }

    /// Returns the checkpoints due at `now` and moves the cursor past them.
    pub fn advance(&mut self, table: &ScheduleTable, now: NaiveDateTime) -> Vec<TimeOfDay> {
        let today = now.date();
        let tod = TimeOfDay::of(&now);

        match self.day {
            Some(day) if day == today => {}
            Some(day) => {
                self.history.insert(day, self.mark);
                self.mark = match self.history.remove(&today) {
                    Some(mark) => mark,
                    None if today > day => DayMark::default(),
                    // an earlier date never polled: its past counts as handled
                    None => DayMark {
                        last_checked: Some(tod),
                        last_fired: None,
                    },
                };
                self.day = Some(today);
                while self.history.len() > HISTORY_DAYS {
                    let farthest = self
                        .history
                        .keys()
                        .copied()
                        .max_by_key(|d| (*d - today).num_days().abs());
                    match farthest {
                        Some(d) => self.history.remove(&d),
                        None => break,
                    };
                }
                tracing::debug!(from = %day, to = %today, "checkpoint cursor switched day");
            }
            None => {
                self.day = Some(today);
                self.mark = DayMark::default();
            }
        }

        let due = table.due_checkpoints(self.mark.floor(), tod);
        if let Some(last) = due.last() {
            self.mark.last_fired = Some(*last);
        }
        self.mark.last_checked = Some(tod);
        due
    }
}
