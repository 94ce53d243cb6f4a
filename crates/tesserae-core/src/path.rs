//! Closed outline paths for mosaic pieces.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Point;

/// One side of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Side {
    /// The upper side.
    #[display("top")]
    Top,
    /// The right-hand side.
    #[display("right")]
    Right,
    /// The lower side.
    #[display("bottom")]
    Bottom,
    /// The left-hand side.
    #[display("left")]
    Left,
}

impl Side {
    /// All sides in clockwise tracing order, starting at the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

/// A single drawing command of an outline, starting where the previous one
/// ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSegment {
    /// A straight line to `to`.
    Line {
        /// End point.
        to: Point,
    },
    /// A cubic Bézier curve to `to`.
    Cubic {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// End point.
        to: Point,
    },
}

impl PathSegment {
    /// Returns the end point of the segment.
    #[must_use]
    pub fn end(&self) -> Point {
        match *self {
            PathSegment::Line { to } | PathSegment::Cubic { to, .. } => to,
        }
    }

    /// Returns the points that define the segment (control points first, end
    /// point last).
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match *self {
            PathSegment::Line { to } => vec![to],
            PathSegment::Cubic { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Line { to } => write!(f, "L {to}"),
            PathSegment::Cubic { ctrl1, ctrl2, to } => write!(f, "C {ctrl1} {ctrl2} {to}"),
        }
    }
}

/// A closed outline traced clockwise from the top-left corner.
///
/// The four segments are the top, right, bottom, and left sides in that order,
/// so the outline of any piece can be inspected side by side.
///
/// # Examples
///
/// ```
/// use tesserae_core::{PathSegment, PiecePath, Point};
///
/// let path = PiecePath::new(
///     Point::new(0.0, 0.0),
///     [
///         PathSegment::Line { to: Point::new(10.0, 0.0) },
///         PathSegment::Line { to: Point::new(10.0, 10.0) },
///         PathSegment::Line { to: Point::new(0.0, 10.0) },
///         PathSegment::Line { to: Point::new(0.0, 0.0) },
///     ],
/// );
/// assert_eq!(path.to_string(), "M 0 0 L 10 0 L 10 10 L 0 10 L 0 0 Z");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePath {
    start: Point,
    sides: [PathSegment; 4],
}

impl PiecePath {
    /// Creates an outline from its starting corner and its four sides.
    #[must_use]
    pub fn new(start: Point, sides: [PathSegment; 4]) -> Self {
        Self { start, sides }
    }

    /// Returns the starting (top-left) corner.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns the segment tracing the given side.
    #[must_use]
    pub fn side(&self, side: Side) -> &PathSegment {
        &self.sides[side as usize]
    }

    /// Returns all four segments in tracing order.
    #[must_use]
    pub fn sides(&self) -> &[PathSegment; 4] {
        &self.sides
    }

    /// Returns the corner where the given side begins.
    #[must_use]
    pub fn side_start(&self, side: Side) -> Point {
        match side {
            Side::Top => self.start,
            Side::Right | Side::Bottom | Side::Left => self.sides[side as usize - 1].end(),
        }
    }

    /// Returns `true` if every side ends where the next begins and the last
    /// side returns to the start.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.sides[3].end().approx_eq(self.start, tolerance)
    }

    /// Iterates over every defining point, including the start.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.sides.iter().flat_map(PathSegment::points))
    }
}

impl Display for PiecePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M {}", self.start)?;
        for segment in &self.sides {
            write!(f, " {segment}")?;
        }
        f.write_str(" Z")
    }
}
