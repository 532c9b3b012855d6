use std::time::{Duration, Instant};

use crate::{
    connect::engine::ConnectorEngine,
    connect::path::ConnectorPath,
    foundation::error::TasklineResult,
    layout::source::BoxSource,
    model::timeline::Timeline,
    schedule::settle::{RecomputeTrigger, SettleScheduler, Ticket},
};

/// Connectors for one mounted timeline, kept current as the host reports layout changes.
///
/// The host forwards mount/resize events to [`ConnectorSession::trigger`] and calls
/// [`ConnectorSession::tick`] from its timer with a fresh box source. Hosts that measure
/// asynchronously can split a tick into [`ConnectorSession::begin`] and
/// [`ConnectorSession::finish`]; results from superseded passes are dropped.
#[derive(Clone, Debug)]
pub struct ConnectorSession {
    timeline: Timeline,
    engine: ConnectorEngine,
    scheduler: SettleScheduler,
    current: Vec<ConnectorPath>,
}

impl ConnectorSession {
    /// Session with the default settle delay.
    pub fn new(timeline: Timeline) -> TasklineResult<Self> {
        Self::with_settle_delay(timeline, crate::schedule::settle::DEFAULT_SETTLE_DELAY)
    }

    /// Session with a custom settle delay.
    pub fn with_settle_delay(timeline: Timeline, settle_delay: Duration) -> TasklineResult<Self> {
        timeline.validate_geometry()?;
        Ok(Self {
            engine: ConnectorEngine::new(timeline.connector),
            timeline,
            scheduler: SettleScheduler::new(settle_delay),
            current: Vec::new(),
        })
    }

    /// The timeline being laid out.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Report a layout-affecting event.
    pub fn trigger(&mut self, trigger: RecomputeTrigger, now: Instant) -> Ticket {
        self.scheduler.request(trigger, now)
    }

    /// When the host should call [`ConnectorSession::tick`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Start a measurement pass if one is due.
    pub fn begin(&mut self, now: Instant) -> Option<Ticket> {
        self.scheduler.poll(now)
    }

    /// Compute connectors from fresh measurements without installing them.
    pub fn measure<S: BoxSource + ?Sized>(&self, boxes: &S) -> Vec<ConnectorPath> {
        self.engine.compute(
            &self.timeline.nodes,
            boxes,
            self.timeline.origin,
            self.timeline.vertical_offset,
        )
    }

    /// Install a pass result unless a newer pass has been requested since it began.
    pub fn finish(&mut self, ticket: Ticket, connectors: Vec<ConnectorPath>) -> bool {
        if !self.scheduler.commit(ticket) {
            return false;
        }
        self.current = connectors;
        true
    }

    /// Run a due pass synchronously. Returns true when a new result was installed.
    #[tracing::instrument(skip(self, boxes))]
    pub fn tick<S: BoxSource + ?Sized>(&mut self, now: Instant, boxes: &S) -> bool {
        let Some(ticket) = self.begin(now) else {
            return false;
        };
        let connectors = self.measure(boxes);
        tracing::debug!(
            generation = ticket.generation(),
            connectors = connectors.len(),
            "recomputed connectors"
        );
        self.finish(ticket, connectors)
    }

    /// Connectors from the latest committed pass.
    pub fn connectors(&self) -> &[ConnectorPath] {
        &self.current
    }

    /// Generation of the displayed connectors, if any pass has committed.
    pub fn generation(&self) -> Option<u64> {
        self.scheduler.committed_generation()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/session.rs"]
mod tests;
