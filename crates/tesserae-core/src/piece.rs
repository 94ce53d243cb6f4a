//! The piece data model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Cell, GridSize, PiecePath, Point, Rect, Rotation};

/// Stable identity of a piece: its row-major index in the solved grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PieceId(pub u32);

impl PieceId {
    /// Returns the identity as an index into per-piece tables.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Creates an identity from a row-major index.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index <= crate::MAX_CELLS);
        Self(index as u32)
    }
}

/// Label of the connected cluster a piece belongs to.
///
/// Every piece starts in the group labelled with its own identity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("g{_0}")]
pub struct GroupId(pub u32);

impl From<PieceId> for GroupId {
    fn from(id: PieceId) -> Self {
        Self(id.0)
    }
}

/// How the board is carved into pieces.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceStyle {
    /// Plain rectangles.
    #[default]
    #[display("classic")]
    Classic,
    /// Organic pieces with curved shared edges between perturbed vertices.
    #[display("mosaic")]
    Mosaic,
}

/// Error returned when parsing an unknown piece style.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown piece style `{name}` (expected classic or mosaic)")]
pub struct ParsePieceStyleError {
    /// The rejected input.
    pub name: String,
}

impl FromStr for PieceStyle {
    type Err = ParsePieceStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "mosaic" => Ok(Self::Mosaic),
            _ => Err(ParsePieceStyleError { name: s.to_owned() }),
        }
    }
}

/// Style-specific piece geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum PieceShape {
    /// A rectangular piece showing a fixed region of the source image.
    Classic {
        /// Background sampling offset, in percent, selecting which part of
        /// the image the piece displays.
        background: Point,
    },
    /// A piece bounded by a closed curved outline.
    Mosaic {
        /// Outline in absolute board coordinates of the solved layout.
        path: PiecePath,
        /// Viewport containing the outline, equal to the padded bounding box.
        view_box: Rect,
    },
}

impl PieceShape {
    /// Returns the style this geometry belongs to.
    #[must_use]
    pub fn style(&self) -> PieceStyle {
        match self {
            PieceShape::Classic { .. } => PieceStyle::Classic,
            PieceShape::Mosaic { .. } => PieceStyle::Mosaic,
        }
    }
}

/// A single puzzle piece.
///
/// Positions are in board-percentage coordinates. `correct` is fixed at
/// generation; `current` changes whenever the piece is committed to a new
/// cell. For mosaic pieces both positions are bounding-box origins, which sit
/// a fixed *anchor offset* away from the origin of the grid cell the piece
/// occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identity.
    pub id: PieceId,
    /// Position in the solved layout.
    pub correct: Point,
    /// Live position.
    pub current: Point,
    /// Bounding-box width.
    pub width: f64,
    /// Bounding-box height.
    pub height: f64,
    /// Current rotation.
    pub rotation: Rotation,
    /// Whether the piece has been permanently placed.
    pub locked: bool,
    /// Connected cluster label.
    pub group: GroupId,
    /// Style-specific geometry.
    pub shape: PieceShape,
}

impl Piece {
    /// Returns the piece's style.
    #[must_use]
    pub fn style(&self) -> PieceStyle {
        self.shape.style()
    }

    /// Returns the grid cell the piece occupies in the solved layout.
    #[must_use]
    pub fn home_cell(&self, grid: GridSize) -> Cell {
        grid.cell_at(self.id.index())
    }

    /// Returns the offset from a grid cell's origin to the piece's position
    /// when it rests in that cell.
    ///
    /// Zero for classic pieces; the bounding-box padding for mosaic pieces.
    #[must_use]
    pub fn anchor_offset(&self, grid: GridSize) -> Point {
        self.correct - grid.cell_origin(self.home_cell(grid))
    }

    /// Returns the position the piece takes when resting in `cell`.
    #[must_use]
    pub fn position_in(&self, cell: Cell, grid: GridSize) -> Point {
        grid.cell_origin(cell) + self.anchor_offset(grid)
    }

    /// Returns the grid cell matching the piece's current position.
    ///
    /// Returns `None` if the position is not within `tolerance` of a cell
    /// inside the grid.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn current_cell(&self, grid: GridSize, tolerance: f64) -> Option<Cell> {
        let origin = self.current - self.anchor_offset(grid);
        if !origin.is_finite() {
            return None;
        }
        let col = (origin.x / grid.cell_width()).round();
        let row = (origin.y / grid.cell_height()).round();
        if col.abs() > f64::from(grid.cols()) || row.abs() > f64::from(grid.rows()) {
            return None;
        }
        let cell = Cell::new(col as i32, row as i32);
        (grid.contains(cell) && grid.cell_origin(cell).approx_eq(origin, tolerance))
            .then_some(cell)
    }

    /// Distance between the current and correct positions.
    #[must_use]
    pub fn distance_to_correct(&self) -> f64 {
        self.current.distance(self.correct)
    }

    /// Returns the bounding box at the current position.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.current.x, self.current.y, self.width, self.height)
    }
}
