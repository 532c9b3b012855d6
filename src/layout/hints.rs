use std::collections::HashMap;

use crate::{
    foundation::core::BoundingBox,
    foundation::error::{TasklineError, TasklineResult},
    layout::source::BoxSource,
    model::node::{NodeId, TaskLayoutNode},
};

/// Lane geometry used to place cards from their static hints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutOpts {
    /// Vertical pitch of one lane.
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Card height; cards are centered vertically within their lane.
    #[serde(default = "default_card_height")]
    pub card_height: f64,
    /// Width for cards that do not declare one.
    #[serde(default = "default_card_width")]
    pub default_width: f64,
    /// Space above the first lane.
    #[serde(default)]
    pub top_padding: f64,
}

fn default_row_height() -> f64 {
    80.0
}

fn default_card_height() -> f64 {
    56.0
}

fn default_card_width() -> f64 {
    200.0
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            card_height: default_card_height(),
            default_width: default_card_width(),
            top_padding: 0.0,
        }
    }
}

impl LayoutOpts {
    /// Reject lane geometry that cannot place a card.
    pub fn validate(&self) -> TasklineResult<()> {
        let fields = [
            ("row_height", self.row_height),
            ("card_height", self.card_height),
            ("default_width", self.default_width),
            ("top_padding", self.top_padding),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(TasklineError::layout(format!("{name} must be finite")));
            }
        }
        if self.row_height <= 0.0 {
            return Err(TasklineError::layout("row_height must be > 0"));
        }
        if self.card_height <= 0.0 {
            return Err(TasklineError::layout("card_height must be > 0"));
        }
        if self.card_height > self.row_height {
            return Err(TasklineError::layout(
                "card_height must not exceed row_height",
            ));
        }
        if self.default_width <= 0.0 {
            return Err(TasklineError::layout("default_width must be > 0"));
        }
        Ok(())
    }

    /// Box a card occupies when placed purely from its hints.
    pub fn box_for(&self, node: &TaskLayoutNode) -> BoundingBox {
        let lane_top = self.top_padding + f64::from(node.row) * self.row_height;
        BoundingBox::new(
            lane_top + (self.row_height - self.card_height) * 0.5,
            node.left_offset,
            node.effective_width(self.default_width),
            self.card_height,
        )
    }
}

/// Bounding boxes derived from static hints, for hosts without a rendering surface.
#[derive(Clone, Debug, Default)]
pub struct HintLayout {
    boxes: HashMap<NodeId, BoundingBox>,
    order: Vec<NodeId>,
}

impl HintLayout {
    /// Place every node. A repeated id keeps the position of its last occurrence.
    pub fn resolve(nodes: &[TaskLayoutNode], opts: &LayoutOpts) -> Self {
        let mut boxes = HashMap::with_capacity(nodes.len());
        let mut order = Vec::with_capacity(nodes.len());
        for node in nodes {
            if boxes.insert(node.id.clone(), opts.box_for(node)).is_none() {
                order.push(node.id.clone());
            }
        }
        Self { boxes, order }
    }

    /// Box for `id`, if it was placed.
    pub fn get(&self, id: &NodeId) -> Option<BoundingBox> {
        self.boxes.get(id).copied()
    }

    /// Placed boxes in first-seen node order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, BoundingBox)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.boxes.get(id).map(|b| (id, *b)))
    }

    /// Number of distinct placed cards.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl BoxSource for HintLayout {
    fn bounding_box_of(&self, id: &NodeId) -> Option<BoundingBox> {
        self.get(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/hints.rs"]
mod tests;
