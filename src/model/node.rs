use std::fmt;

/// Identifier of a task card.
///
/// Timelines may spell ids as JSON integers or strings; both forms normalize to the same
/// string key, so `1` and `"1"` refer to the same card. The spelling is remembered for
/// output: an id read as an integer serializes back as an integer.
#[derive(Clone, Debug)]
pub struct NodeId {
    key: String,
    numeric: bool,
}

impl NodeId {
    /// Build a string-form id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: id.into(),
            numeric: false,
        }
    }

    fn numeric(key: String) -> Self {
        Self { key, numeric: true }
    }

    /// Borrow the normalized id.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// True if the id was given as an integer.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NodeId {}

impl std::hash::Hash for NodeId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self::numeric(value.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::numeric(value.to_string())
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::numeric(value.to_string())
    }
}

impl serde::Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.numeric {
            if let Ok(v) = self.key.parse::<i64>() {
                return serializer.serialize_i64(v);
            }
            if let Ok(v) = self.key.parse::<u64>() {
                return serializer.serialize_u64(v);
            }
        }
        serializer.serialize_str(&self.key)
    }
}

impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct NodeIdVisitor;

        impl serde::de::Visitor<'_> for NodeIdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a node id (string or integer)")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<NodeId, E> {
                Ok(NodeId::from(v))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<NodeId, E> {
                Ok(NodeId::new(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<NodeId, E> {
                Ok(NodeId::from(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<NodeId, E> {
                Ok(NodeId::from(v))
            }
        }

        deserializer.deserialize_any(NodeIdVisitor)
    }
}

/// One task card on the timeline, with the static hints used to place it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaskLayoutNode {
    /// Unique card id.
    pub id: NodeId,
    /// Zero-based lane index (one lane per team member).
    #[serde(default)]
    pub row: u32,
    /// Horizontal offset within the lane, in pixels.
    #[serde(default)]
    pub left_offset: f64,
    /// Card width; the layout fallback width applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Card this one connects to. A pure relational pointer; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor_id: Option<NodeId>,
}

impl TaskLayoutNode {
    /// Build a node without width override or successor.
    pub fn new(id: impl Into<NodeId>, row: u32, left_offset: f64) -> Self {
        Self {
            id: id.into(),
            row,
            left_offset,
            width: None,
            successor_id: None,
        }
    }

    /// Set an explicit card width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Point this node at its successor.
    pub fn with_successor(mut self, id: impl Into<NodeId>) -> Self {
        self.successor_id = Some(id.into());
        self
    }

    /// Width to lay the card out with.
    pub fn effective_width(&self, default_width: f64) -> f64 {
        self.width.unwrap_or(default_width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/node.rs"]
mod tests;
