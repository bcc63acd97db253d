#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use crossbeam_channel::Sender;
use rtimeprompt::core::consumer::PromptConsumer;
use rtimeprompt::errors::AppResult;
use rtimeprompt::models::prompt::{Notice, PromptOutcome, PromptRequest};
use rtimeprompt::models::time_of_day::TimeOfDay;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

pub fn rtp() -> Command {
    cargo_bin_cmd!("rtimeprompt")
}

/// 2024-01-15 is a Monday.
pub fn monday(h: u32, m: u32) -> NaiveDateTime {
    at(2024, 1, 15, h, m)
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub fn tod(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

pub const HEADER_LINE: &str = "Subject,Start Date,Start Time,End Date,End Time,Description";

/// What a scripted user does with the next prompt.
#[derive(Debug, Clone)]
pub enum Step {
    Accept {
        project: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    AcceptDefaults(String),
    Cancel,
}

pub fn accept(project: &str, start: NaiveDateTime, end: NaiveDateTime) -> Step {
    Step::Accept {
        project: project.to_string(),
        start,
        end,
    }
}

/// Prompt consumer driven by a fixed script. Cancels once the script runs out.
#[derive(Default)]
pub struct ScriptedConsumer {
    pub script: VecDeque<Step>,
    pub presented: usize,
    pub notices: Vec<Notice>,
    pub defaults_seen: Vec<(NaiveDateTime, NaiveDateTime)>,
    pub projects_seen: Vec<Vec<String>>,
    pub quit_after: Option<(usize, Sender<String>)>,
    open: bool,
}

impl ScriptedConsumer {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            script: steps.into(),
            ..Default::default()
        }
    }

    /// Type "q" into `input` once `n` prompts have been presented.
    pub fn quit_after(mut self, n: usize, input: Sender<String>) -> Self {
        self.quit_after = Some((n, input));
        self
    }

    pub fn failures(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                Notice::Failure(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                Notice::Success(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl PromptConsumer for ScriptedConsumer {
    fn present(&mut self, request: &PromptRequest<'_>) -> AppResult<PromptOutcome> {
        assert!(!self.open, "two prompts open at the same time");
        self.open = true;
        self.presented += 1;
        self.defaults_seen
            .push((request.default_start, request.default_end));
        self.projects_seen.push(request.projects.to_vec());

        let outcome = match self.script.pop_front() {
            Some(Step::Accept {
                project,
                start,
                end,
            }) => PromptOutcome::Accepted {
                project,
                start,
                end,
            },
            Some(Step::AcceptDefaults(project)) => PromptOutcome::Accepted {
                project,
                start: request.default_start,
                end: request.default_end,
            },
            Some(Step::Cancel) | None => PromptOutcome::Cancelled,
        };

        if let Some((n, tx)) = &self.quit_after
            && self.presented == *n
        {
            tx.send("q".to_string()).unwrap();
        }
        self.open = false;
        Ok(outcome)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
