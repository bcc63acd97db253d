//! Cross-thread bridge between prompt producers (the scheduler thread, the
//! manual "test" command) and the single foreground consumer.
//!
//! Producers hold a cloneable [`PromptRequester`]; enqueueing never blocks.
//! The [`Dispatcher`] itself stays with the foreground loop, which pulls one
//! event at a time and presents it synchronously, so at most one prompt is
//! open and requests are seen in the order they were raised.

use crate::models::prompt::{PromptEvent, PromptOrigin};
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub struct PromptRequester {
    tx: Sender<PromptEvent>,
    seq: Arc<AtomicU64>,
}

impl PromptRequester {
    /// Queue a prompt. Returns `false` when the foreground side has gone
    /// away; the request is then dropped.
    pub fn request_prompt(&self, origin: PromptOrigin) -> bool {
        let event = PromptEvent {
            seq: self.seq.fetch_add(1, Ordering::SeqCst),
            origin,
        };
        match self.tx.send(event) {
            Ok(()) => {
                tracing::debug!(seq = event.seq, %origin, "prompt requested");
                true
            }
            Err(_) => {
                tracing::warn!(seq = event.seq, %origin, "prompt request dropped: no foreground consumer");
                false
            }
        }
    }
}

pub struct Dispatcher {
    tx: Sender<PromptEvent>,
    rx: Receiver<PromptEvent>,
    seq: Arc<AtomicU64>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            seq: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn requester(&self) -> PromptRequester {
        PromptRequester {
            tx: self.tx.clone(),
            seq: Arc::clone(&self.seq),
        }
    }

    /// Next queued event, if any, without waiting.
    pub fn try_next(&self) -> Option<PromptEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Foreground-side receiver, for use in `select!` alongside other inputs.
    pub fn receiver(&self) -> &Receiver<PromptEvent> {
        &self.rx
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Drops every queued request without presenting it.
    pub fn discard_pending(&self) -> usize {
        self.rx.try_iter().count()
    }
}
