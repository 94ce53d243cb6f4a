//! Jigsaw piece generation.
//!
//! Given a grid, a piece style, and a random source, this crate produces a
//! complete scattered piece set:
//!
//! - [`curve`] and [`edge_segment`] derive the shared edge curves of mosaic
//!   pieces from hashed edge identifiers, so neighbors agree on every edge.
//! - [`scatter_cells`] assigns starting slots as a uniform permutation of
//!   the grid cells.
//! - [`generate_pieces`] builds the pieces for either style from an injected
//!   generator, and [`PuzzleGenerator`] wraps it with reproducible
//!   [`PuzzleSeed`]s.
//!
//! # Examples
//!
//! ```
//! use tesserae_core::{Difficulty, DifficultyTable, PieceStyle};
//! use tesserae_generator::PuzzleGenerator;
//!
//! let table = DifficultyTable::default();
//! let profile = table.profile(Difficulty::Easy);
//! let puzzle = PuzzleGenerator::from_profile(profile, PieceStyle::Classic)?.generate();
//! assert_eq!(puzzle.pieces.len(), 9);
//!
//! // The seed reproduces the same puzzle.
//! let again = PuzzleGenerator::from_profile(profile, PieceStyle::Classic)?
//!     .generate_with_seed(puzzle.seed);
//! assert_eq!(again, puzzle);
//! # Ok::<(), tesserae_core::GridError>(())
//! ```

mod builder;
mod edge;
mod scatter;
mod seed;

pub use self::{
    builder::{GeneratedPuzzle, MOSAIC_PADDING, PuzzleGenerator, VERTEX_JITTER, generate_pieces},
    edge::{CURVE_AMPLITUDE, EdgeId, curve, edge_fractions, edge_segment, fnv1a32},
    scatter::{fisher_yates, scatter_cells},
    seed::{ParseSeedError, PuzzleSeed},
};
