use std::collections::{BTreeMap, HashMap};

use crate::{foundation::core::BoundingBox, model::node::NodeId};

/// Lookup of the live bounding box for a task card.
///
/// This is where the rendering layer plugs in: a DOM-backed host measures elements, tests
/// hand in synthetic boxes. `None` means the card is not (yet) measurable.
pub trait BoxSource {
    /// Current box for `id`, if the card is rendered.
    fn bounding_box_of(&self, id: &NodeId) -> Option<BoundingBox>;
}

impl<F> BoxSource for F
where
    F: Fn(&NodeId) -> Option<BoundingBox>,
{
    fn bounding_box_of(&self, id: &NodeId) -> Option<BoundingBox> {
        self(id)
    }
}

impl<S: std::hash::BuildHasher> BoxSource for HashMap<NodeId, BoundingBox, S> {
    fn bounding_box_of(&self, id: &NodeId) -> Option<BoundingBox> {
        self.get(id).copied()
    }
}

impl BoxSource for BTreeMap<NodeId, BoundingBox> {
    fn bounding_box_of(&self, id: &NodeId) -> Option<BoundingBox> {
        self.get(id).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/source.rs"]
mod tests;
