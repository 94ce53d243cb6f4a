//! Deterministic curves for shared piece edges.
//!
//! Two neighboring mosaic pieces trace their common edge independently, in
//! opposite directions. Both must produce the same curve in space, so the
//! bulge of an edge is derived from a hash of its identifier rather than from
//! the generator's random stream.

use tesserae_core::{GridSize, PathSegment, Point};

/// Peak control-point displacement as a fraction of edge length, reached at
/// the extremes of the hashed range.
pub const CURVE_AMPLITUDE: f64 = 0.25;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Identifies one edge of the cell lattice.
///
/// # Examples
///
/// ```
/// use tesserae_generator::EdgeId;
///
/// assert_eq!(EdgeId::Horizontal { row: 2, col: 0 }.to_string(), "h2-0");
/// assert_eq!(EdgeId::Vertical { col: 3, row: 1 }.to_string(), "v3-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EdgeId {
    /// The edge along the top of cell `(col, row)`; `row == rows` is the
    /// bottom border.
    #[display("h{row}-{col}")]
    Horizontal {
        /// Lattice row, in `0..=rows`.
        row: i32,
        /// Cell column, in `0..cols`.
        col: i32,
    },
    /// The edge along the left of cell `(col, row)`; `col == cols` is the
    /// right border.
    #[display("v{col}-{row}")]
    Vertical {
        /// Lattice column, in `0..=cols`.
        col: i32,
        /// Cell row, in `0..rows`.
        row: i32,
    },
}

impl EdgeId {
    /// Returns `true` if the edge lies on the outer border of the grid.
    #[must_use]
    pub fn is_boundary(self, grid: GridSize) -> bool {
        match self {
            EdgeId::Horizontal { row, .. } => row == 0 || row == i32::from(grid.rows()),
            EdgeId::Vertical { col, .. } => col == 0 || col == i32::from(grid.cols()),
        }
    }
}

/// 32-bit FNV-1a hash.
#[must_use]
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Splits the hash of an edge identifier into two fractions in `[0, 1]`.
#[must_use]
pub fn edge_fractions(edge_id: &str) -> (f64, f64) {
    let hash = fnv1a32(edge_id.as_bytes());
    let scale = f64::from(u16::MAX);
    (f64::from(hash >> 16) / scale, f64::from(hash & 0xffff) / scale)
}

/// Returns the cubic curve from `p1` to `p2` for the edge named `edge_id`.
///
/// The control points sit at one and two thirds of the chord, pushed along
/// its unit normal. Callers walking an edge against its forward direction
/// pass the endpoints swapped together with `reversed = true`; the result
/// then traces the forward curve backwards, with identical control points in
/// swapped order.
///
/// # Examples
///
/// ```
/// use tesserae_core::{PathSegment, Point};
/// use tesserae_generator::curve;
///
/// let (a, b) = (Point::new(10.0, 20.0), Point::new(30.0, 20.0));
/// let forward = curve(a, b, "h1-0", false);
/// let backward = curve(b, a, "h1-0", true);
/// let PathSegment::Cubic { ctrl1, ctrl2, .. } = forward else {
///     unreachable!();
/// };
/// let PathSegment::Cubic { ctrl1: r1, ctrl2: r2, .. } = backward else {
///     unreachable!();
/// };
/// assert!(ctrl1.approx_eq(r2, 1e-9));
/// assert!(ctrl2.approx_eq(r1, 1e-9));
/// ```
#[must_use]
pub fn curve(p1: Point, p2: Point, edge_id: &str, reversed: bool) -> PathSegment {
    let chord = p2 - p1;
    let len = chord.length();
    if len <= f64::EPSILON {
        return PathSegment::Line { to: p2 };
    }
    let normal = Point::new(-chord.y / len, chord.x / len);
    let (v1, v2) = edge_fractions(edge_id);
    let m1 = CURVE_AMPLITUDE * len * (v1 - 0.5);
    let m2 = CURVE_AMPLITUDE * len * (v2 - 0.5);
    let (m1, m2) = if reversed { (-m2, -m1) } else { (m1, m2) };
    PathSegment::Cubic {
        ctrl1: p1 + chord * (1.0 / 3.0) + normal * m1,
        ctrl2: p1 + chord * (2.0 / 3.0) + normal * m2,
        to: p2,
    }
}

/// Returns the segment for one side of a cell: a straight line on the grid
/// border, a hashed curve everywhere else.
#[must_use]
pub fn edge_segment(
    grid: GridSize,
    edge: EdgeId,
    p1: Point,
    p2: Point,
    reversed: bool,
) -> PathSegment {
    if edge.is_boundary(grid) {
        PathSegment::Line { to: p2 }
    } else {
        curve(p1, p2, &edge.to_string(), reversed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_points(segment: PathSegment) -> (Point, Point) {
        match segment {
            PathSegment::Cubic { ctrl1, ctrl2, .. } => (ctrl1, ctrl2),
            PathSegment::Line { .. } => panic!("expected a curve"),
        }
    }

    #[test]
    fn test_fnv1a32_reference_values() {
        assert_eq!(fnv1a32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_fractions_in_unit_range() {
        for id in ["h1-0", "h1-1", "v2-5", "v10-9"] {
            let (v1, v2) = edge_fractions(id);
            assert!((0.0..=1.0).contains(&v1));
            assert!((0.0..=1.0).contains(&v2));
        }
    }

    #[test]
    fn test_reversed_curve_coincides() {
        let a = Point::new(12.5, 40.0);
        let b = Point::new(17.0, 61.0);
        let (f1, f2) = control_points(curve(a, b, "v1-2", false));
        let (r1, r2) = control_points(curve(b, a, "v1-2", true));
        assert!(f1.approx_eq(r2, 1e-9));
        assert!(f2.approx_eq(r1, 1e-9));
    }

    #[test]
    fn test_displacement_is_bounded() {
        let a = Point::new(0.0, 50.0);
        let b = Point::new(20.0, 50.0);
        let limit = CURVE_AMPLITUDE * 20.0 * 0.5 + 1e-9;
        for col in 0..20 {
            let (c1, c2) = control_points(curve(a, b, &format!("h3-{col}"), false));
            assert!((c1.y - 50.0).abs() <= limit);
            assert!((c2.y - 50.0).abs() <= limit);
        }
    }

    #[test]
    fn test_degenerate_edge_is_straight() {
        let p = Point::new(5.0, 5.0);
        assert!(curve(p, p, "h1-1", false).is_line());
    }

    #[test]
    fn test_boundary_edges_are_straight() {
        let grid = GridSize::new(3, 2).unwrap();
        let (a, b) = (Point::new(0.0, 0.0), Point::new(0.0, 50.0));
        for edge in [
            EdgeId::Horizontal { row: 0, col: 1 },
            EdgeId::Horizontal { row: 2, col: 2 },
            EdgeId::Vertical { col: 0, row: 1 },
            EdgeId::Vertical { col: 3, row: 0 },
        ] {
            assert!(edge.is_boundary(grid));
            assert!(edge_segment(grid, edge, a, b, false).is_line());
        }
        let inner = EdgeId::Vertical { col: 1, row: 0 };
        assert!(!inner.is_boundary(grid));
        assert!(edge_segment(grid, inner, a, b, false).is_cubic());
    }
}
