//! Grid dimensions, cells, and cell deltas.
//!
//! Every puzzle is laid over a regular `rows × cols` grid spanning the board's
//! 0-100 percentage coordinate space. Pieces always rest on whole cells, so
//! collision and neighbor queries are exact integer comparisons rather than
//! floating-point proximity checks.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::Point;

/// Width and height of the board in percentage units.
pub const BOARD_EXTENT: f64 = 100.0;

/// Largest number of cells a grid may contain.
pub const MAX_CELLS: usize = 4096;

/// A grid cell identified by its column and row.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Cell, CellDelta};
///
/// let cell = Cell::new(2, 1);
/// assert_eq!(cell + CellDelta::new(1, -1), Cell::new(3, 0));
/// ```
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
#[display("({col}, {row})")]
pub struct Cell {
    /// Column index, counted from the left edge.
    pub col: i32,
    /// Row index, counted from the top edge.
    pub row: i32,
}

impl Cell {
    /// Creates a cell from a column and row.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl Add<CellDelta> for Cell {
    type Output = Cell;

    fn add(self, delta: CellDelta) -> Cell {
        Cell::new(self.col + delta.dcol, self.row + delta.drow)
    }
}

impl Sub<CellDelta> for Cell {
    type Output = Cell;

    fn sub(self, delta: CellDelta) -> Cell {
        Cell::new(self.col - delta.dcol, self.row - delta.drow)
    }
}

impl Sub for Cell {
    type Output = CellDelta;

    fn sub(self, other: Cell) -> CellDelta {
        CellDelta::new(self.col - other.col, self.row - other.row)
    }
}

/// A whole-number displacement between two cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({dcol:+}, {drow:+})")]
pub struct CellDelta {
    /// Column displacement; positive is rightwards.
    pub dcol: i32,
    /// Row displacement; positive is downwards.
    pub drow: i32,
}

impl CellDelta {
    /// No displacement.
    pub const ZERO: Self = Self::new(0, 0);

    /// The four orthogonal unit steps, in up, right, down, left order.
    pub const NEIGHBORS: [Self; 4] = [
        Self::new(0, -1),
        Self::new(1, 0),
        Self::new(0, 1),
        Self::new(-1, 0),
    ];

    /// Creates a delta from column and row displacements.
    #[must_use]
    pub const fn new(dcol: i32, drow: i32) -> Self {
        Self { dcol, drow }
    }

    /// Returns `true` if the delta does not move anything.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.dcol == 0 && self.drow == 0
    }
}

impl Neg for CellDelta {
    type Output = CellDelta;

    fn neg(self) -> CellDelta {
        CellDelta::new(-self.dcol, -self.drow)
    }
}

/// Errors returned when constructing a [`GridSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The grid has no rows or no columns.
    #[display("grid must have at least one row and one column (got {cols}x{rows})")]
    Empty {
        /// Requested column count.
        cols: u16,
        /// Requested row count.
        rows: u16,
    },
    /// The grid has more cells than [`MAX_CELLS`].
    #[display("grid of {cols}x{rows} exceeds {MAX_CELLS} cells")]
    TooLarge {
        /// Requested column count.
        cols: u16,
        /// Requested row count.
        rows: u16,
    },
}

/// Dimensions of a puzzle grid.
///
/// Cells are indexed in row-major order, which is also the order in which
/// piece identities are assigned.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Cell, GridSize};
///
/// let grid = GridSize::new(4, 3)?;
/// assert_eq!(grid.len(), 12);
/// assert_eq!(grid.index_of(Cell::new(1, 2)), 9);
/// assert_eq!(grid.cell_at(9), Cell::new(1, 2));
/// assert_eq!(grid.cell_width(), 25.0);
/// # Ok::<(), tesserae_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    cols: u16,
    rows: u16,
}

impl GridSize {
    /// Creates a grid with the given number of columns and rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if either dimension is zero and
    /// [`GridError::TooLarge`] if the grid would exceed [`MAX_CELLS`] cells.
    pub fn new(cols: u16, rows: u16) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::Empty { cols, rows });
        }
        if usize::from(cols) * usize::from(rows) > MAX_CELLS {
            return Err(GridError::TooLarge { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(self) -> u16 {
        self.cols
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(self) -> u16 {
        self.rows
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }

    /// Always `false`; a grid has at least one cell.
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Width of one cell in board-percentage units.
    #[must_use]
    pub fn cell_width(self) -> f64 {
        BOARD_EXTENT / f64::from(self.cols)
    }

    /// Height of one cell in board-percentage units.
    #[must_use]
    pub fn cell_height(self) -> f64 {
        BOARD_EXTENT / f64::from(self.rows)
    }

    /// Returns `true` if the cell lies inside the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        (0..i32::from(self.cols)).contains(&cell.col)
            && (0..i32::from(self.rows)).contains(&cell.row)
    }

    /// Returns the row-major index of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[must_use]
    pub fn index_of(self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {cell} outside {self:?}");
        #[expect(clippy::cast_sign_loss)]
        let (col, row) = (cell.col as usize, cell.row as usize);
        row * usize::from(self.cols) + col
    }

    /// Returns the cell at a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`len`](Self::len).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cell_at(self, index: usize) -> Cell {
        assert!(index < self.len(), "cell index {index} outside {self:?}");
        let cols = usize::from(self.cols);
        Cell::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl ExactSizeIterator<Item = Cell> + Clone {
        (0..self.len()).map(move |index| self.cell_at(index))
    }

    /// Returns the top-left corner of a cell in board-percentage units.
    #[must_use]
    pub fn cell_origin(self, cell: Cell) -> Point {
        Point::new(
            f64::from(cell.col) * self.cell_width(),
            f64::from(cell.row) * self.cell_height(),
        )
    }

    /// Returns the cell containing a board-percentage point, if any.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn cell_containing(self, point: Point) -> Option<Cell> {
        if !point.is_finite() {
            return None;
        }
        let col = (point.x / self.cell_width()).floor();
        let row = (point.y / self.cell_height()).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some(Cell::new(col as i32, row as i32))
    }

    /// Converts a displacement given as fractions of the board size into the
    /// nearest whole-cell delta.
    ///
    /// Each component is clamped to the grid extent; a delta that large
    /// already carries any cell off the grid.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn round_delta(self, fraction_x: f64, fraction_y: f64) -> CellDelta {
        let cols = f64::from(self.cols);
        let rows = f64::from(self.rows);
        let dcol = (fraction_x * cols).round().clamp(-cols, cols);
        let drow = (fraction_y * rows).round().clamp(-rows, rows);
        CellDelta::new(dcol as i32, drow as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_grids() {
        assert_eq!(GridSize::new(0, 3), Err(GridError::Empty { cols: 0, rows: 3 }));
        assert_eq!(GridSize::new(3, 0), Err(GridError::Empty { cols: 3, rows: 0 }));
        assert_eq!(
            GridSize::new(100, 100),
            Err(GridError::TooLarge {
                cols: 100,
                rows: 100
            })
        );
        assert!(GridSize::new(1, 1).is_ok());
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = GridSize::new(3, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(2, 1),
            ]
        );
        for (index, cell) in cells.into_iter().enumerate() {
            assert_eq!(grid.index_of(cell), index);
        }
    }

    #[test]
    fn test_cell_containing_edges() {
        let grid = GridSize::new(4, 4).unwrap();
        assert_eq!(grid.cell_containing(Point::new(0.0, 0.0)), Some(Cell::new(0, 0)));
        assert_eq!(grid.cell_containing(Point::new(99.9, 50.0)), Some(Cell::new(3, 2)));
        assert_eq!(grid.cell_containing(Point::new(100.0, 50.0)), None);
        assert_eq!(grid.cell_containing(Point::new(-0.1, 50.0)), None);
        assert_eq!(grid.cell_containing(Point::new(f64::NAN, 50.0)), None);
    }

    #[test]
    fn test_round_delta() {
        let grid = GridSize::new(5, 5).unwrap();
        assert_eq!(grid.round_delta(0.0, 0.0), CellDelta::ZERO);
        assert_eq!(grid.round_delta(0.21, -0.39), CellDelta::new(1, -2));
        assert_eq!(grid.round_delta(0.09, 0.11), CellDelta::new(0, 1));
        assert_eq!(grid.round_delta(1e13, -1e13), CellDelta::new(5, -5));
        assert_eq!(grid.round_delta(f64::INFINITY, 0.0), CellDelta::new(5, 0));
    }

    #[test]
    fn test_cell_arithmetic() {
        let a = Cell::new(2, 3);
        let b = Cell::new(4, 1);
        assert_eq!(b - a, CellDelta::new(2, -2));
        assert_eq!(a + (b - a), b);
        assert_eq!(b - (b - a), a);
        assert_eq!(-CellDelta::new(1, -1), CellDelta::new(-1, 1));
    }
}
