use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    connect::engine::{ConnectorEngine, ConnectorOpts},
    connect::path::ConnectorPath,
    foundation::core::{BoundingBox, ContainerOrigin},
    foundation::error::{TasklineError, TasklineResult},
    layout::hints::{HintLayout, LayoutOpts},
    model::node::{NodeId, TaskLayoutNode},
};

/// A measured box for one card, as recorded in a timeline file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasuredBox {
    /// Card the measurement belongs to.
    pub id: NodeId,
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl MeasuredBox {
    /// The measurement as a bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.top, self.left, self.width, self.height)
    }
}

/// JSON-facing description of one timeline: its cards plus everything needed to lay out
/// their connectors.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Task cards, in display order.
    pub nodes: Vec<TaskLayoutNode>,
    /// Offset of the connector overlay container.
    #[serde(default)]
    pub origin: ContainerOrigin,
    /// Constant nudge applied to every connector endpoint's height.
    #[serde(default)]
    pub vertical_offset: f64,
    /// Connector geometry options.
    #[serde(default)]
    pub connector: ConnectorOpts,
    /// Lane geometry for hint-based placement.
    #[serde(default)]
    pub layout: LayoutOpts,
    /// Live measurements; when absent, cards are placed from their hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<Vec<MeasuredBox>>,
}

impl Timeline {
    /// Timeline with default options and no measurements.
    pub fn new(nodes: Vec<TaskLayoutNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// Parse a timeline from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TasklineResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TasklineError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline from a JSON file on disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> TasklineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TasklineError::Other(
                anyhow::Error::from(e)
                    .context(format!("open timeline JSON '{}'", path.display())),
            )
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ids, hints, and options.
    ///
    /// Dangling successors are not an error here; see [`Timeline::dangling_successors`].
    pub fn validate(&self) -> TasklineResult<()> {
        self.validate_geometry()?;
        self.layout.validate()?;

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(&node.id) {
                return Err(TasklineError::validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            if !node.left_offset.is_finite() {
                return Err(TasklineError::validation(format!(
                    "node '{}' left_offset must be finite",
                    node.id
                )));
            }
            if node.width.is_some_and(|w| !w.is_finite() || w < 0.0) {
                return Err(TasklineError::validation(format!(
                    "node '{}' width must be finite and >= 0",
                    node.id
                )));
            }
        }

        if let Some(boxes) = &self.boxes {
            for m in boxes {
                if !m.bounding_box().is_finite() {
                    return Err(TasklineError::validation(format!(
                        "measured box for '{}' must be finite",
                        m.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check the values every connector is computed from: connector options, container
    /// origin, and vertical offset. Non-finite values here would leak into path data.
    pub fn validate_geometry(&self) -> TasklineResult<()> {
        self.connector.validate()?;
        if !self.vertical_offset.is_finite() {
            return Err(TasklineError::validation("vertical_offset must be finite"));
        }
        if !self.origin.left.is_finite() || !self.origin.top.is_finite() {
            return Err(TasklineError::validation("origin must be finite"));
        }
        Ok(())
    }

    /// Nodes whose successor names no node in this timeline, as `(node, successor)`.
    pub fn dangling_successors(&self) -> Vec<(&NodeId, &NodeId)> {
        let ids: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        self.nodes
            .iter()
            .filter_map(|n| n.successor_id.as_ref().map(|s| (&n.id, s)))
            .filter(|(_, s)| !ids.contains(s))
            .collect()
    }

    /// Measured boxes keyed by id, if the timeline carries measurements.
    pub fn measured_boxes(&self) -> Option<HashMap<NodeId, BoundingBox>> {
        self.boxes.as_ref().map(|boxes| {
            boxes
                .iter()
                .map(|m| (m.id.clone(), m.bounding_box()))
                .collect()
        })
    }

    /// Boxes placed from the nodes' static hints.
    pub fn hint_layout(&self) -> HintLayout {
        HintLayout::resolve(&self.nodes, &self.layout)
    }

    /// Connectors for this timeline, from measurements when present and hints otherwise.
    pub fn compute(&self) -> Vec<ConnectorPath> {
        let engine = ConnectorEngine::new(self.connector);
        match self.measured_boxes() {
            Some(measured) => {
                engine.compute(&self.nodes, &measured, self.origin, self.vertical_offset)
            }
            None => engine.compute(
                &self.nodes,
                &self.hint_layout(),
                self.origin,
                self.vertical_offset,
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/timeline.rs"]
mod tests;
