//! Coalescing of layout-affecting events into connector recomputations.
//!
//! Measurements taken before layout settles are stale, and resize events arrive in bursts.
//! [`SettleScheduler`] turns a stream of triggers into at most one pending recomputation:
//! each new request supersedes the previous one and restarts the settle delay ("latest
//! wins"). Every request is stamped with a [`Ticket`]; results computed under a ticket that
//! has since been superseded are rejected by [`SettleScheduler::commit`].
//!
//! Time is passed in by the caller, so the scheduler never reads a clock itself.

use std::time::{Duration, Instant};

/// Default delay between the last trigger and the measurement pass.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Event that invalidates the current connectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputeTrigger {
    /// First render of the timeline.
    Mount,
    /// The canvas container changed size.
    ContainerResize,
    /// The window changed size.
    WindowResize,
    /// Explicit request; due immediately.
    Manual,
}

/// Stamp identifying one recomputation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    trigger: RecomputeTrigger,
}

impl Ticket {
    /// Monotonic request number, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Trigger that produced the request.
    pub fn trigger(&self) -> RecomputeTrigger {
        self.trigger
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    ticket: Ticket,
    due: Instant,
}

/// Debounces recompute triggers and arbitrates which result is displayed.
#[derive(Clone, Debug)]
pub struct SettleScheduler {
    settle_delay: Duration,
    issued: u64,
    committed: Option<u64>,
    pending: Option<Pending>,
}

impl Default for SettleScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

impl SettleScheduler {
    /// Scheduler with a custom settle delay.
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            settle_delay,
            issued: 0,
            committed: None,
            pending: None,
        }
    }

    /// Configured settle delay.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Record a trigger, replacing any pending request.
    pub fn request(&mut self, trigger: RecomputeTrigger, now: Instant) -> Ticket {
        self.issued += 1;
        let ticket = Ticket {
            generation: self.issued,
            trigger,
        };
        let due = match trigger {
            RecomputeTrigger::Manual => now,
            _ => now + self.settle_delay,
        };
        if let Some(old) = self.pending.replace(Pending { ticket, due }) {
            tracing::debug!(
                superseded = old.ticket.generation,
                by = ticket.generation,
                ?trigger,
                "coalesced recompute request"
            );
        }
        ticket
    }

    /// Take the pending request once its settle delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Ticket> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some(p.ticket)
            }
            _ => None,
        }
    }

    /// When the pending request becomes due, for arming the host's timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// True while a request is waiting for its settle delay.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True if no newer request has been issued since `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.issued
    }

    /// Decide whether a result computed under `ticket` may replace the displayed one.
    ///
    /// Only the most recently issued ticket commits, and each ticket commits at most once.
    pub fn commit(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.issued,
                "discarding superseded connector result"
            );
            return false;
        }
        if self.committed.is_some_and(|c| c >= ticket.generation) {
            return false;
        }
        self.committed = Some(ticket.generation);
        true
    }

    /// Generation of the last committed result.
    pub fn committed_generation(&self) -> Option<u64> {
        self.committed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/settle.rs"]
mod tests;
