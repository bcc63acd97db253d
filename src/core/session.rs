//! Foreground side of a scheduler session.
//!
//! The session owns the dispatcher's receiving end, the prompt consumer and
//! the log store. `serve` is the single drain loop: it presents queued prompts
//! one at a time, oldest first, and only looks at status updates and typed
//! commands when no prompt is waiting.

use crate::core::clock::Clock;
use crate::core::consumer::PromptConsumer;
use crate::core::dispatcher::{Dispatcher, PromptRequester};
use crate::core::policy::round_down_to_half_hour;
use crate::core::schedule::ScheduleTable;
use crate::core::scheduler::{SchedulerHandle, SchedulerLoop, SchedulerState};
use crate::core::status::{SchedulerStatus, StatusFeed, status_feed};
use crate::errors::AppResult;
use crate::models::prompt::{Notice, PromptEvent, PromptOrigin, PromptOutcome, PromptRequest};
use crate::models::time_entry::{LogRecord, TimeEntry};
use crate::store::log_store::LogStore;
use chrono::Duration;
use crossbeam_channel::{Receiver, select};
use std::sync::Arc;

/// A command typed into a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TestPrompt,
    Status,
    Help,
    Stop,
    Unknown(String),
}

impl Command {
    /// `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_lowercase();
        let cmd = match word.as_str() {
            "" => return None,
            "t" | "test" => Command::TestPrompt,
            "s" | "status" => Command::Status,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "stop" | "exit" => Command::Stop,
            _ => Command::Unknown(word),
        };
        Some(cmd)
    }
}

pub const COMMAND_HELP: &str = "Commands: [t]est prompt, [s]tatus, [h]elp, [q]uit";

/// Scheduling settings of a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub projects: Vec<String>,
    pub table: ScheduleTable,
    pub poll_interval: std::time::Duration,
    pub catch_up_missed: bool,
}

pub struct Session<P: PromptConsumer> {
    options: SessionOptions,
    dispatcher: Dispatcher,
    store: LogStore,
    consumer: P,
    clock: Arc<dyn Clock>,
    status_feed: StatusFeed,
    status_rx: Receiver<SchedulerStatus>,
    last_status: Option<SchedulerStatus>,
    scheduler: Option<SchedulerHandle>,
}

impl<P: PromptConsumer> Session<P> {
    pub fn new(options: SessionOptions, store: LogStore, consumer: P, clock: Arc<dyn Clock>) -> Self {
        let (status_feed, status_rx) = status_feed();
        Self {
            options,
            dispatcher: Dispatcher::new(),
            store,
            consumer,
            clock,
            status_feed,
            status_rx,
            last_status: None,
            scheduler: None,
        }
    }

    pub fn requester(&self) -> PromptRequester {
        self.dispatcher.requester()
    }

    pub fn consumer(&self) -> &P {
        &self.consumer
    }

    pub fn pending_prompts(&self) -> usize {
        self.dispatcher.pending()
    }

    pub fn last_status(&self) -> Option<SchedulerStatus> {
        self.last_status
    }

    /// Spawn a fresh scheduler loop for this session.
    pub fn start_scheduler(&mut self) -> AppResult<()> {
        if self.scheduler_state() == SchedulerState::Running {
            return Ok(());
        }
        let scheduler = SchedulerLoop::new(
            self.options.table.clone(),
            self.dispatcher.requester(),
            Arc::new(self.status_feed.clone()),
            Arc::clone(&self.clock),
            self.options.poll_interval,
            self.options.catch_up_missed,
        );
        self.scheduler = Some(scheduler.spawn()?);
        tracing::info!(
            checkpoints = self.options.table.checkpoints().len(),
            "scheduler session started"
        );
        Ok(())
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
            .as_ref()
            .map(SchedulerHandle::state)
            .unwrap_or(SchedulerState::Stopped)
    }

    /// Foreground drain loop. Returns when a stop command arrives or the
    /// input closes.
    pub fn serve(&mut self, input: &Receiver<String>) -> AppResult<()> {
        let prompts = self.dispatcher.receiver().clone();
        let statuses = self.status_rx.clone();

        loop {
            // queued prompts always go first, in arrival order
            if let Some(event) = self.dispatcher.try_next() {
                self.handle_prompt(event);
                continue;
            }

            select! {
                recv(prompts) -> msg => {
                    if let Ok(event) = msg {
                        self.handle_prompt(event);
                    }
                }
                recv(statuses) -> msg => {
                    if let Ok(status) = msg {
                        self.update_status(status);
                    }
                }
                recv(input) -> msg => match msg {
                    Ok(line) => {
                        if !self.handle_command(&line) {
                            break;
                        }
                    }
                    Err(_) => {
                        tracing::debug!("input closed, ending session");
                        break;
                    }
                },
            }
        }
        Ok(())
    }

    /// Returns `false` when the session should stop.
    fn handle_command(&mut self, line: &str) -> bool {
        match Command::parse(line) {
            None => {}
            Some(Command::TestPrompt) => {
                self.dispatcher.requester().request_prompt(PromptOrigin::Manual);
            }
            Some(Command::Status) => {
                let text = match self.last_status {
                    Some(status) => format!(
                        "Current time: {} | Next prompt: {}",
                        status.now.format("%H:%M:%S"),
                        status
                            .next_checkpoint
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "Not scheduled".to_string())
                    ),
                    None => "Scheduler has not reported yet".to_string(),
                };
                self.consumer.notify(Notice::Info(text));
            }
            Some(Command::Help) => self.consumer.notify(Notice::Info(COMMAND_HELP.to_string())),
            Some(Command::Stop) => return false,
            Some(Command::Unknown(word)) => self
                .consumer
                .notify(Notice::Info(format!("Unknown command '{word}'. {COMMAND_HELP}"))),
        }
        true
    }

    fn update_status(&mut self, status: SchedulerStatus) {
        self.consumer.show_status(&status);
        self.last_status = Some(status);
    }

    /// Present one prompt and record the result. Entries that fail
    /// validation are reported and the prompt is shown again.
    pub fn handle_prompt(&mut self, event: PromptEvent) -> Option<LogRecord> {
        tracing::info!(seq = event.seq, origin = %event.origin, "presenting prompt");

        let now = round_down_to_half_hour(self.clock.now());
        let request = PromptRequest {
            projects: &self.options.projects,
            date: now.date(),
            default_start: *now - Duration::minutes(30),
            default_end: *now,
        };

        loop {
            let outcome = match self.consumer.present(&request) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(error = %e, "prompt failed");
                    self.consumer.notify(Notice::Failure(e.to_string()));
                    return None;
                }
            };

            match outcome {
                PromptOutcome::Cancelled => {
                    tracing::info!(seq = event.seq, "prompt cancelled");
                    return None;
                }
                PromptOutcome::Accepted { project, start, end } => {
                    match TimeEntry::new(&project, start, end) {
                        Ok(entry) => return record_entry(&self.store, &mut self.consumer, &entry),
                        Err(e) => {
                            tracing::info!(error = %e, "entry rejected");
                            self.consumer.notify(Notice::Failure(e.to_string()));
                        }
                    }
                }
            }
        }
    }

    /// Stop the scheduler and drop anything still queued. Returns how many
    /// requests were discarded.
    pub fn shutdown(&mut self) -> usize {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.stop();
        }
        let dropped = self.dispatcher.discard_pending();
        if dropped > 0 {
            tracing::warn!(dropped, "session closed with unpresented prompts");
        }
        dropped
    }
}

impl<P: PromptConsumer> Drop for Session<P> {
    fn drop(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.stop();
        }
    }
}

/// Append `entry` and tell the consumer how it went. A failed write is
/// reported, never propagated.
pub fn record_entry<P: PromptConsumer + ?Sized>(
    store: &LogStore,
    consumer: &mut P,
    entry: &TimeEntry,
) -> Option<LogRecord> {
    match store.append(entry) {
        Ok(record) => {
            consumer.notify(Notice::Success(format!(
                "Entry added: {} on {} at {}",
                record.subject, record.start_date, record.start_time
            )));
            Some(record)
        }
        Err(e) => {
            tracing::error!(error = %e, path = %store.path().display(), "failed to append entry");
            consumer.notify(Notice::Failure(format!("Failed to write entry: {e}")));
            None
        }
    }
}
