//! Core data structures for jigsaw puzzle engines.
//!
//! This crate provides the plain, serializable data shared by puzzle
//! generation and interactive play.
//!
//! # Overview
//!
//! 1. **Board space**
//!    - [`grid`]: grid dimensions, cells, and whole-cell deltas
//!    - [`geometry`]: points and rectangles in board-percentage coordinates
//!    - [`path`]: closed piece outlines built from line and cubic segments
//!
//! 2. **Pieces**
//!    - [`piece`]: piece identity, style, shape, and positions
//!    - [`rotation`]: quarter-turn rotations
//!    - [`group`]: the merge-only partition of pieces into connected groups
//!
//! 3. **Configuration**
//!    - [`difficulty`]: named difficulty levels and the profile table
//!
//! # Examples
//!
//! ```
//! use tesserae_core::{Cell, Difficulty, DifficultyTable, Point};
//!
//! let table = DifficultyTable::default();
//! let grid = table.profile(Difficulty::Normal).grid()?;
//! assert_eq!(grid.len(), 25);
//! assert_eq!(grid.cell_origin(Cell::new(2, 1)), Point::new(40.0, 20.0));
//! # Ok::<(), tesserae_core::GridError>(())
//! ```

pub mod difficulty;
pub mod geometry;
pub mod grid;
pub mod group;
pub mod path;
pub mod piece;
pub mod rotation;

pub use self::{
    difficulty::{
        Difficulty, DifficultyProfile, DifficultyTable, ParseDifficultyError, ProfileError,
    },
    geometry::{Coord, Point, Rect},
    grid::{BOARD_EXTENT, Cell, CellDelta, GridError, GridSize, MAX_CELLS},
    group::{GroupSets, Merge},
    path::{PathSegment, PiecePath, Side},
    piece::{GroupId, ParsePieceStyleError, Piece, PieceId, PieceShape, PieceStyle},
    rotation::{Rotation, RotationError},
};
