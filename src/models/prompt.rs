use super::time_of_day::TimeOfDay;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Where a prompt request came from. Only used for logging: the foreground
/// presents every request the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOrigin {
    Scheduled(TimeOfDay),
    Manual,
}

impl fmt::Display for PromptOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptOrigin::Scheduled(at) => write!(f, "checkpoint {at}"),
            PromptOrigin::Manual => write!(f, "manual request"),
        }
    }
}

/// "A prompt is due now". `seq` is the arrival order assigned by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptEvent {
    pub seq: u64,
    pub origin: PromptOrigin,
}

/// Everything the prompt renderer needs to show one entry form.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub projects: &'a [String],
    pub date: NaiveDate,
    pub default_start: NaiveDateTime,
    pub default_end: NaiveDateTime,
}

/// What the user did with a presented prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Accepted {
        project: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Cancelled,
}

/// A user-visible message sent back to the foreground consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
    Info(String),
}
