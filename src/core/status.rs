//! Passive "current time / next checkpoint" updates for display.

use crate::models::time_of_day::TimeOfDay;
use chrono::NaiveDateTime;
use crossbeam_channel::{Receiver, Sender, bounded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub now: NaiveDateTime,
    pub next_checkpoint: Option<TimeOfDay>,
}

/// Fire-and-forget receiver of scheduler status.
pub trait StatusSink: Send + Sync {
    fn publish(&self, status: SchedulerStatus);
}

/// Sink that ignores every update.
pub struct NoStatus;

impl StatusSink for NoStatus {
    fn publish(&self, _status: SchedulerStatus) {}
}

/// Hands status updates to the foreground loop through a one-slot channel.
/// An update the foreground has not read yet is replaced by the newer one.
#[derive(Clone)]
pub struct StatusFeed {
    tx: Sender<SchedulerStatus>,
    stale: Receiver<SchedulerStatus>,
}

pub fn status_feed() -> (StatusFeed, Receiver<SchedulerStatus>) {
    let (tx, rx) = bounded(1);
    (
        StatusFeed {
            tx,
            stale: rx.clone(),
        },
        rx,
    )
}

impl StatusSink for StatusFeed {
    fn publish(&self, status: SchedulerStatus) {
        // latest wins: drop the unread update before offering this one
        while self.stale.try_recv().is_ok() {}
        if self.tx.try_send(status).is_err() {
            tracing::trace!("status update dropped");
        }
    }
}
