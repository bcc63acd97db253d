//! Terminal front end: line-based entry prompt, notices and status output.

use crate::core::consumer::PromptConsumer;
use crate::core::status::SchedulerStatus;
use crate::errors::AppResult;
use crate::models::prompt::{Notice, PromptOutcome, PromptRequest};
use crate::models::time_of_day::TimeOfDay;
use crate::ui::messages::{error, header, info, success};
use crate::utils::time::{format_span, parse_time};
use chrono::NaiveDateTime;
use crossbeam_channel::{Receiver, unbounded};
use std::io::{self, BufRead, Write};

/// Forward stdin lines into a channel from a helper thread. The channel
/// closes at end of input.
pub fn spawn_stdin_reader() -> AppResult<Receiver<String>> {
    let (tx, rx) = unbounded();
    std::thread::Builder::new()
        .name("rtimeprompt-stdin".to_owned())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read from stdin");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

enum Answer<T> {
    Value(T),
    Cancel,
}

pub struct TerminalConsumer {
    input: Receiver<String>,
    last_next: Option<Option<TimeOfDay>>,
}

impl TerminalConsumer {
    pub fn new(input: Receiver<String>) -> Self {
        Self {
            input,
            last_next: None,
        }
    }

    fn ask(&self, label: &str) -> Option<String> {
        print!("{label}: ");
        io::stdout().flush().ok();
        // end of input behaves like cancel
        self.input.recv().ok().map(|l| l.trim().to_string())
    }

    fn ask_project(&self, projects: &[String]) -> Answer<String> {
        for (i, p) in projects.iter().enumerate() {
            println!("  {}) {}", i + 1, p);
        }
        println!("  0) Other");

        loop {
            let Some(answer) = self.ask("Project [1]") else {
                return Answer::Cancel;
            };
            if is_cancel(&answer) {
                return Answer::Cancel;
            }
            if answer.is_empty() && !projects.is_empty() {
                return Answer::Value(projects[0].clone());
            }
            if let Ok(n) = answer.parse::<usize>() {
                if n == 0 {
                    return self.ask_custom_project();
                }
                if let Some(p) = projects.get(n - 1) {
                    return Answer::Value(p.clone());
                }
            } else if let Some(p) = projects.iter().find(|p| p.eq_ignore_ascii_case(&answer)) {
                return Answer::Value(p.clone());
            }
            error(format!("Unknown project '{answer}'. Pick a number from the list."));
        }
    }

    fn ask_custom_project(&self) -> Answer<String> {
        loop {
            let Some(answer) = self.ask("Custom project name") else {
                return Answer::Cancel;
            };
            if is_cancel(&answer) {
                return Answer::Cancel;
            }
            if !answer.is_empty() {
                return Answer::Value(answer);
            }
            error("Please enter a custom project name");
        }
    }

    fn ask_time(&self, label: &str, request: &PromptRequest<'_>, default: NaiveDateTime) -> Answer<NaiveDateTime> {
        loop {
            let Some(answer) = self.ask(&format!("{label} [{}]", default.format("%H:%M"))) else {
                return Answer::Cancel;
            };
            if is_cancel(&answer) {
                return Answer::Cancel;
            }
            if answer.is_empty() {
                return Answer::Value(default);
            }
            match parse_time(&answer) {
                Some(t) => return Answer::Value(request.date.and_time(t)),
                None => error(format!("Invalid time '{answer}', expected HH:MM")),
            }
        }
    }
}

fn is_cancel(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "c" | "cancel")
}

impl PromptConsumer for TerminalConsumer {
    fn present(&mut self, request: &PromptRequest<'_>) -> AppResult<PromptOutcome> {
        println!();
        header("Create Time Tracking Entry");
        println!("Date: {}   (type 'c' to cancel)", request.date.format("%Y-%m-%d"));

        let Answer::Value(project) = self.ask_project(request.projects) else {
            return Ok(PromptOutcome::Cancelled);
        };
        let Answer::Value(start) = self.ask_time("Start time", request, request.default_start) else {
            return Ok(PromptOutcome::Cancelled);
        };
        let Answer::Value(end) = self.ask_time("End time", request, request.default_end) else {
            return Ok(PromptOutcome::Cancelled);
        };

        if end > start {
            info(format!("{project}: {} ({})", start.format("%H:%M"), format_span(start, end)));
        }
        Ok(PromptOutcome::Accepted { project, start, end })
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Success(msg) => success(msg),
            Notice::Failure(msg) => error(msg),
            Notice::Info(msg) => info(msg),
        }
    }

    fn show_status(&mut self, status: &SchedulerStatus) {
        if self.last_next == Some(status.next_checkpoint) {
            return;
        }
        self.last_next = Some(status.next_checkpoint);
        match status.next_checkpoint {
            Some(next) => info(format!("Next prompt: {next}")),
            None => info("Next prompt: Not scheduled"),
        }
    }
}
