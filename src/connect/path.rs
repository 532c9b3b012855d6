use std::fmt::Write as _;

use crate::{
    foundation::core::{BezPath, Point},
    foundation::error::{TasklineError, TasklineResult},
    model::node::NodeId,
};

/// Geometry of a connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    /// Straight segment between cards on the same visual row.
    Line,
    /// Horizontal S-curve between cards on different rows.
    Curve,
}

/// Small filled circle drawn at a connector endpoint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EndpointMarker {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
}

/// One connector from a card to its successor, ready for the caller to stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConnectorPath {
    /// Card the connector leaves from.
    pub from: NodeId,
    /// Successor card the connector arrives at.
    pub to: NodeId,
    /// Line or curve.
    pub shape: PathShape,
    /// SVG path data (`M .. L ..` or `M .. C ..`).
    pub path_command: String,
    /// Right-center of the source card, container-relative.
    pub start_point: Point,
    /// Left-center of the successor card, container-relative.
    pub end_point: Point,
    /// Radius of both endpoint markers.
    pub marker_radius: f64,
}

impl ConnectorPath {
    /// Build a connector between two container-relative points.
    pub(crate) fn between(
        from: NodeId,
        to: NodeId,
        shape: PathShape,
        start_point: Point,
        end_point: Point,
        marker_radius: f64,
    ) -> Self {
        let path_command = match shape {
            PathShape::Line => line_command(start_point, end_point),
            PathShape::Curve => curve_command(start_point, end_point),
        };
        Self {
            from,
            to,
            shape,
            path_command,
            start_point,
            end_point,
            marker_radius,
        }
    }

    /// Start and end markers, in that order.
    pub fn markers(&self) -> [EndpointMarker; 2] {
        [
            EndpointMarker {
                center: self.start_point,
                radius: self.marker_radius,
            },
            EndpointMarker {
                center: self.end_point,
                radius: self.marker_radius,
            },
        ]
    }

    /// The connector as a `kurbo` path, for hosts that draw with a vector library.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start_point);
        match self.shape {
            PathShape::Line => path.line_to(self.end_point),
            PathShape::Curve => {
                let (c1, c2) = curve_controls(self.start_point, self.end_point);
                path.curve_to(c1, c2, self.end_point);
            }
        }
        path
    }
}

/// Control points of the S-curve: both on the horizontal midpoint, one at each endpoint's
/// height, so the curve leaves and arrives horizontally.
pub(crate) fn curve_controls(start: Point, end: Point) -> (Point, Point) {
    let mid_x = (start.x + end.x) * 0.5;
    (Point::new(mid_x, start.y), Point::new(mid_x, end.y))
}

/// `M x1 y1 L x2 y2`
pub(crate) fn line_command(start: Point, end: Point) -> String {
    let mut s = String::with_capacity(32);
    let _ = write!(
        s,
        "M {} {} L {} {}",
        Num(start.x),
        Num(start.y),
        Num(end.x),
        Num(end.y)
    );
    s
}

/// `M x1 y1 C mx y1, mx y2, x2 y2`
pub(crate) fn curve_command(start: Point, end: Point) -> String {
    let (c1, c2) = curve_controls(start, end);
    let mut s = String::with_capacity(64);
    let _ = write!(
        s,
        "M {} {} C {} {}, {} {}, {} {}",
        Num(start.x),
        Num(start.y),
        Num(c1.x),
        Num(c1.y),
        Num(c2.x),
        Num(c2.y),
        Num(end.x),
        Num(end.y)
    );
    s
}

/// Shortest round-trip decimal, with `-0` printed as `0`.
struct Num(f64);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{v}")
    }
}

/// A path command decoded back into its points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedPath {
    /// Line or curve.
    pub shape: PathShape,
    /// `M` point.
    pub start: Point,
    /// Curve control points; `None` for lines.
    pub controls: Option<(Point, Point)>,
    /// Final point.
    pub end: Point,
}

/// Parse the two command forms this crate emits.
///
/// Commas are treated as whitespace. Anything else (relative commands, extra segments,
/// missing coordinates) is rejected.
pub fn parse_path_command(cmd: &str) -> TasklineResult<ParsedPath> {
    let normalized = cmd.replace(',', " ");
    let mut tokens = normalized.split_whitespace();

    expect_op(&mut tokens, "M", cmd)?;
    let start = read_point(&mut tokens, cmd)?;

    let parsed = match tokens.next() {
        Some("L") => ParsedPath {
            shape: PathShape::Line,
            start,
            controls: None,
            end: read_point(&mut tokens, cmd)?,
        },
        Some("C") => {
            let c1 = read_point(&mut tokens, cmd)?;
            let c2 = read_point(&mut tokens, cmd)?;
            ParsedPath {
                shape: PathShape::Curve,
                start,
                controls: Some((c1, c2)),
                end: read_point(&mut tokens, cmd)?,
            }
        }
        other => {
            return Err(TasklineError::validation(format!(
                "expected 'L' or 'C' in path '{cmd}', found {other:?}"
            )));
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(TasklineError::validation(format!(
            "trailing token '{extra}' in path '{cmd}'"
        )));
    }
    Ok(parsed)
}

fn expect_op<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    op: &str,
    cmd: &str,
) -> TasklineResult<()> {
    match tokens.next() {
        Some(t) if t == op => Ok(()),
        other => Err(TasklineError::validation(format!(
            "expected '{op}' in path '{cmd}', found {other:?}"
        ))),
    }
}

fn read_point<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    cmd: &str,
) -> TasklineResult<Point> {
    let mut coord = || -> TasklineResult<f64> {
        let t = tokens
            .next()
            .ok_or_else(|| TasklineError::validation(format!("truncated path '{cmd}'")))?;
        t.parse::<f64>().map_err(|e| {
            TasklineError::validation(format!("bad coordinate '{t}' in path '{cmd}': {e}"))
        })
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/connect/path.rs"]
mod tests;
