use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;
use serde::Serialize;

/// An accepted time interval for one project.
///
/// Only constructible through [`TimeEntry::new`], so every value that reaches
/// the log store has a non-empty project and `end > start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    project: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeEntry {
    pub fn new(project: &str, start: NaiveDateTime, end: NaiveDateTime) -> AppResult<Self> {
        let project = project.trim();
        if project.is_empty() {
            return Err(AppError::EmptyProject);
        }
        if end <= start {
            return Err(AppError::EndNotAfterStart { start, end });
        }
        Ok(Self {
            project: project.to_string(),
            start,
            end,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn to_record(&self) -> LogRecord {
        LogRecord::from(self)
    }
}

/// One persisted row of the CSV log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl LogRecord {
    pub const HEADERS: [&'static str; 6] = [
        "Subject",
        "Start Date",
        "Start Time",
        "End Date",
        "End Time",
        "Description",
    ];
}

impl From<&TimeEntry> for LogRecord {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            subject: format!("Timetracking: {}", entry.project),
            start_date: entry.start.format("%m/%d/%Y").to_string(),
            start_time: entry.start.format("%H:%M").to_string(),
            end_date: entry.end.format("%m/%d/%Y").to_string(),
            end_time: entry.end.format("%H:%M").to_string(),
            description: format!("Time tracking for {}", entry.project),
        }
    }
}
