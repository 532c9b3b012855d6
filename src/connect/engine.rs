use crate::{
    connect::path::{ConnectorPath, PathShape},
    foundation::core::{BoundingBox, ContainerOrigin, Point},
    foundation::error::{TasklineError, TasklineResult},
    layout::source::BoxSource,
    model::node::{NodeId, TaskLayoutNode},
};

/// Tunables for connector geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConnectorOpts {
    /// Endpoints whose heights differ by less than this are joined with a straight line.
    #[serde(default = "default_same_row_epsilon")]
    pub same_row_epsilon: f64,
    /// Radius of the endpoint markers.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
}

fn default_same_row_epsilon() -> f64 {
    2.0
}

fn default_marker_radius() -> f64 {
    4.0
}

impl Default for ConnectorOpts {
    fn default() -> Self {
        Self {
            same_row_epsilon: default_same_row_epsilon(),
            marker_radius: default_marker_radius(),
        }
    }
}

impl ConnectorOpts {
    /// Reject options that would produce meaningless geometry.
    pub fn validate(&self) -> TasklineResult<()> {
        if !self.same_row_epsilon.is_finite() || self.same_row_epsilon < 0.0 {
            return Err(TasklineError::validation(
                "same_row_epsilon must be finite and >= 0",
            ));
        }
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(TasklineError::validation(
                "marker_radius must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Stateless connector layout over live bounding boxes.
///
/// Each call re-reads every box from the source and builds a fresh output; nothing is
/// cached between calls, so repeated calls over unchanged measurements are identical.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectorEngine {
    opts: ConnectorOpts,
}

impl ConnectorEngine {
    /// Engine with custom options.
    pub fn new(opts: ConnectorOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &ConnectorOpts {
        &self.opts
    }

    /// Compute one connector per node whose successor is measurable, in node order.
    ///
    /// Nodes without a successor, with a dangling or self-referencing successor, or whose
    /// endpoints are not measurable are skipped; one bad node never affects the rest.
    #[tracing::instrument(skip(self, nodes, boxes), fields(node_count = nodes.len()))]
    pub fn compute<S: BoxSource + ?Sized>(
        &self,
        nodes: &[TaskLayoutNode],
        boxes: &S,
        origin: ContainerOrigin,
        vertical_offset: f64,
    ) -> Vec<ConnectorPath> {
        let mut out = Vec::new();
        for node in nodes {
            let Some(to) = node.successor_id.as_ref() else {
                continue;
            };
            if *to == node.id {
                tracing::debug!(node = %node.id, "skipping self-referencing successor");
                continue;
            }
            let Some(from_box) = measurable(boxes, &node.id) else {
                tracing::debug!(node = %node.id, "skipping connector: source not measurable");
                continue;
            };
            let Some(to_box) = measurable(boxes, to) else {
                tracing::debug!(node = %node.id, successor = %to, "skipping connector: successor not measurable");
                continue;
            };

            let start = origin.localize(from_box.right(), from_box.center_y() + vertical_offset);
            let end = origin.localize(to_box.left, to_box.center_y() + vertical_offset);
            out.push(ConnectorPath::between(
                node.id.clone(),
                to.clone(),
                self.shape_between(start, end),
                start,
                end,
                self.opts.marker_radius,
            ));
        }
        out
    }

    fn shape_between(&self, start: Point, end: Point) -> PathShape {
        if (start.y - end.y).abs() < self.opts.same_row_epsilon {
            PathShape::Line
        } else {
            PathShape::Curve
        }
    }
}

fn measurable<S: BoxSource + ?Sized>(boxes: &S, id: &NodeId) -> Option<BoundingBox> {
    boxes.bounding_box_of(id).filter(BoundingBox::is_finite)
}

/// Compute connectors with default options (2 px same-row tolerance, 4 px markers).
pub fn compute_connectors<S: BoxSource + ?Sized>(
    nodes: &[TaskLayoutNode],
    boxes: &S,
    origin: ContainerOrigin,
    vertical_offset: f64,
) -> Vec<ConnectorPath> {
    ConnectorEngine::default().compute(nodes, boxes, origin, vertical_offset)
}

#[cfg(test)]
#[path = "../../tests/unit/connect/engine.rs"]
mod tests;
