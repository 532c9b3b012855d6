//! taskline lays out the connector lines of a task timeline.
//!
//! A timeline is a set of task cards placed in lanes (one lane per team member). Each card
//! may name a successor card; taskline computes the connector drawn between them from the
//! cards' live bounding boxes:
//!
//! 1. **Measure**: the host renders the cards and exposes their boxes through a
//!    [`BoxSource`] (or uses [`HintLayout`] to place them from static hints).
//! 2. **Connect**: [`compute_connectors`] / [`ConnectorEngine::compute`] turn boxes into
//!    [`ConnectorPath`]s: a straight line for cards on the same visual row, a horizontal
//!    S-curve otherwise, plus an endpoint marker at each end.
//! 3. **Render**: the host strokes `path_command` (SVG path data) or
//!    [`ConnectorPath::to_bez_path`] and fills the two markers.
//!
//! Computation is pure and never fails: unresolved successors and unmeasurable cards are
//! skipped. Recomputation after mount and resize is coordinated by [`SettleScheduler`] and
//! [`ConnectorSession`], which debounce triggers and drop superseded results.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod connect;
mod foundation;
mod layout;
mod model;
mod schedule;

pub use connect::engine::{ConnectorEngine, ConnectorOpts, compute_connectors};
pub use connect::path::{
    ConnectorPath, EndpointMarker, ParsedPath, PathShape, parse_path_command,
};
pub use foundation::core::{BezPath, BoundingBox, ContainerOrigin, Point, Rect};
pub use foundation::error::{TasklineError, TasklineResult};
pub use layout::hints::{HintLayout, LayoutOpts};
pub use layout::source::BoxSource;
pub use model::node::{NodeId, TaskLayoutNode};
pub use model::timeline::{MeasuredBox, Timeline};
pub use schedule::session::ConnectorSession;
pub use schedule::settle::{DEFAULT_SETTLE_DELAY, RecomputeTrigger, SettleScheduler, Ticket};
