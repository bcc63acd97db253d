//! Background scheduler loop.
//!
//! The loop is an owned value built from its dependencies; [`SchedulerLoop::spawn`]
//! moves it onto its own thread and returns a [`SchedulerHandle`] that stops it.

use crate::core::clock::Clock;
use crate::core::dispatcher::PromptRequester;
use crate::core::policy::{is_tracked_day, weekday_name};
use crate::core::schedule::{CheckpointCursor, ScheduleTable};
use crate::core::status::{SchedulerStatus, StatusSink};
use crate::errors::{AppError, AppResult};
use crate::models::prompt::PromptOrigin;
use crate::models::time_of_day::TimeOfDay;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// What a single poll did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub fired: Vec<TimeOfDay>,
    pub suppressed: Vec<TimeOfDay>,
    pub next_checkpoint: Option<TimeOfDay>,
}

pub struct SchedulerLoop {
    table: ScheduleTable,
    requester: PromptRequester,
    status: Arc<dyn StatusSink>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    cursor: CheckpointCursor,
}

impl SchedulerLoop {
    /// With `catch_up_missed`, the first poll fires each checkpoint already
    /// elapsed today once; otherwise it starts counting from now.
    pub fn new(
        table: ScheduleTable,
        requester: PromptRequester,
        status: Arc<dyn StatusSink>,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
        catch_up_missed: bool,
    ) -> Self {
        let cursor = if catch_up_missed {
            CheckpointCursor::new()
        } else {
            CheckpointCursor::starting_at(clock.now())
        };
        Self {
            table,
            requester,
            status,
            clock,
            poll_interval,
            cursor,
        }
    }

    /// One wake-up: fire what is due, then publish the next checkpoint.
    pub fn poll_once(&mut self) -> PollReport {
        let now = self.clock.now();
        let due = self.cursor.advance(&self.table, now);
        let mut report = PollReport::default();

        if !due.is_empty() {
            if is_tracked_day(now.date()) {
                for checkpoint in due {
                    tracing::info!(%checkpoint, "checkpoint reached, requesting prompt");
                    if !self.requester.request_prompt(PromptOrigin::Scheduled(checkpoint)) {
                        tracing::warn!(%checkpoint, "prompt for checkpoint could not be queued");
                    }
                    report.fired.push(checkpoint);
                }
            } else {
                tracing::info!(
                    day = weekday_name(now.date()),
                    count = due.len(),
                    "no timetracking entries on weekends, checkpoints skipped"
                );
                report.suppressed = due;
            }
        }

        report.next_checkpoint = self.table.next_checkpoint(TimeOfDay::of(&now));
        self.status.publish(SchedulerStatus {
            now,
            next_checkpoint: report.next_checkpoint,
        });
        tracing::trace!(%now, next = ?report.next_checkpoint, "scheduler poll");
        report
    }

    /// Run the loop on a dedicated thread until the handle stops it.
    pub fn spawn(mut self) -> AppResult<SchedulerHandle> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);

        let join = std::thread::Builder::new()
            .name("rtimeprompt-scheduler".to_owned())
            .spawn(move || {
                tracing::debug!(interval = ?self.poll_interval, "scheduler started");
                self.run(&stop_rx);
                running_flag.store(false, Ordering::SeqCst);
                tracing::debug!("scheduler stopped");
            })
            .map_err(|e| AppError::Scheduler(format!("failed to spawn scheduler thread: {e}")))?;

        Ok(SchedulerHandle {
            stop_tx: Some(stop_tx),
            join: Some(join),
            running,
        })
    }

    fn run(&mut self, stop_rx: &Receiver<()>) {
        loop {
            self.poll_once();
            match stop_rx.recv_timeout(self.poll_interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                // explicit stop, or the handle was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

/// Owner-side control of a running scheduler thread.
pub struct SchedulerHandle {
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl SchedulerHandle {
    pub fn state(&self) -> SchedulerState {
        if self.running.load(Ordering::SeqCst) {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    /// Signal the loop and wait for its thread. Queued prompts are not
    /// touched; the loop only ever waits on its own poll interval.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            tracing::error!("scheduler thread panicked");
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
