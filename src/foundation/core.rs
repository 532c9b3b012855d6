pub use kurbo::{BezPath, Point, Rect};

/// Rendered position and size of a task card, in the same coordinate space as the
/// container origin it is measured against.
///
/// Produced fresh by the rendering layer on every layout pass; read-only here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoundingBox {
    /// Build a box from its top-left corner and size.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical center of the box.
    pub fn center_y(&self) -> f64 {
        self.top + self.height * 0.5
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Convert to a `kurbo` rectangle (`x0 = left`, `y0 = top`).
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }

    /// Build a box from a `kurbo` rectangle, normalizing inverted edges.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.y0, r.x0, r.width(), r.height())
    }
}

/// Offset of the connector overlay container, subtracted from measured boxes so that
/// connector coordinates are container-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerOrigin {
    /// Left edge of the container.
    #[serde(default)]
    pub left: f64,
    /// Top edge of the container.
    #[serde(default)]
    pub top: f64,
}

impl ContainerOrigin {
    /// Build an origin from its left/top offsets.
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Translate a point from box space into container space.
    pub fn localize(&self, x: f64, y: f64) -> Point {
        Point::new(x - self.left, y - self.top)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
