//! Points and rectangles in board-percentage coordinates.

use std::{
    fmt::{self, Display},
    ops::{Add, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};

/// A point (or vector) in board-percentage coordinates.
///
/// The board spans `0.0..=100.0` on both axes regardless of the rendered pixel
/// size, so positions survive window resizes and serialization unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the point taken as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if both coordinates are within `tolerance` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Coord(self.x), Coord(self.y))
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
#[derive(Debug, Clone, Copy)]
pub struct Coord(pub f64);

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.3}", self.0);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        if text == "-0" || text.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(text)
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the smallest rectangle containing every point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Grows the rectangle outward by `dx` on the left and right and `dy` on
    /// the top and bottom.
    #[must_use]
    pub fn padded(self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if the point lies inside or on the border.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    /// Formats the rectangle as an SVG `viewBox` attribute value.
    #[must_use]
    pub fn view_box(self) -> String {
        format!(
            "{} {} {} {}",
            Coord(self.x),
            Coord(self.y),
            Coord(self.width),
            Coord(self.height)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_formatting() {
        assert_eq!(Coord(12.5).to_string(), "12.5");
        assert_eq!(Coord(10.0).to_string(), "10");
        assert_eq!(Coord(1.0 / 3.0).to_string(), "0.333");
        assert_eq!(Coord(-0.0001).to_string(), "0");
        assert_eq!(Point::new(3.25, -1.0).to_string(), "3.25 -1");
    }

    #[test]
    fn test_bounding_and_padding() {
        let rect = Rect::bounding([
            Point::new(10.0, 20.0),
            Point::new(30.0, 5.0),
            Point::new(15.0, 25.0),
        ])
        .unwrap();
        assert_eq!(rect, Rect::new(10.0, 5.0, 20.0, 20.0));
        assert_eq!(rect.padded(1.0, 2.0), Rect::new(9.0, 3.0, 22.0, 24.0));
        assert_eq!(rect.view_box(), "10 5 20 20");
        assert!(Rect::bounding(std::iter::empty::<Point>()).is_none());
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a - a, Point::ZERO);
        assert_eq!(a * 2.0 + -a, a);
        assert_eq!(a.distance(Point::ZERO), 5.0);
    }
}
