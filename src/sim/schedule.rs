//! Single-shot deferred transitions
//!
//! Phase timeouts run against the session clock (accumulated frame time), not
//! the frame count. Each entry carries the epoch it was scheduled in; bumping
//! the epoch turns every older entry into a no-op when it comes due.

use serde::{Deserialize, Serialize};

/// What to do when a deferred entry comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Rolling is over: pick the winning ball
    SelectWinner,
    /// Reveal is over: remove the winner and return to idle
    RetireWinner,
}

/// A scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub due_ms: f64,
    pub epoch: u64,
    pub action: DeferredAction,
}

/// Deferred transitions keyed to a session clock
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    epoch: u64,
    /// Sorted by due time
    pending: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Advance the clock (negative elapsed time is ignored)
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms > 0.0 {
            self.now_ms += elapsed_ms;
        }
    }

    /// Schedule `action` to fire `delay_ms` from now in the current epoch
    pub fn schedule(&mut self, delay_ms: f64, action: DeferredAction) {
        let entry = Deferred {
            due_ms: self.now_ms + delay_ms.max(0.0),
            epoch: self.epoch,
            action,
        };
        let index = self.pending.partition_point(|d| d.due_ms <= entry.due_ms);
        self.pending.insert(index, entry);
    }

    /// Start a new epoch; everything already scheduled goes stale
    pub fn invalidate(&mut self) {
        self.epoch += 1;
        log::debug!("Scheduler epoch {} ({} entries now stale)", self.epoch, self.live_count());
    }

    /// Pop the next due entry of the current epoch, discarding stale ones on the way
    pub fn pop_due(&mut self) -> Option<DeferredAction> {
        while self.pending.first().is_some_and(|d| d.due_ms <= self.now_ms) {
            let entry = self.pending.remove(0);
            if entry.epoch == self.epoch {
                return Some(entry.action);
            }
            log::debug!(
                "Discarding stale {:?} from epoch {} (now {})",
                entry.action,
                entry.epoch,
                self.epoch
            );
        }
        None
    }

    /// Entries of the current epoch still waiting
    pub fn live_count(&self) -> usize {
        self.pending.iter().filter(|d| d.epoch == self.epoch).count()
    }

    /// Next live entry, if any
    pub fn next_live(&self) -> Option<&Deferred> {
        self.pending.iter().find(|d| d.epoch == self.epoch)
    }
}
