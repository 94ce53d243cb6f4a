//! Piece set construction for both piece styles.

use rand::{Rng, prelude::*};
use tesserae_core::{
    BOARD_EXTENT, Cell, DifficultyProfile, GridError, GridSize, Piece, PieceId, PiecePath,
    PieceShape, PieceStyle, Point, Rect, Rotation,
};

use crate::{
    edge::{EdgeId, edge_segment},
    scatter::{fisher_yates, scatter_cells},
    seed::PuzzleSeed,
};

/// Largest offset of an internal mosaic vertex, as a fraction of the cell
/// size along each axis.
pub const VERTEX_JITTER: f64 = 0.25;

/// Padding added around each mosaic piece's corner bounding box, as a
/// fraction of the cell size. Must cover [`VERTEX_JITTER`] plus the curve
/// overshoot.
pub const MOSAIC_PADDING: f64 = 0.35;

/// Solved-layout geometry of one piece.
struct Layout {
    correct: Point,
    width: f64,
    height: f64,
    shape: PieceShape,
}

/// Builds a complete scattered piece set.
///
/// Pieces receive identities in row-major order of their home cells. Each
/// piece starts in a randomly permuted cell, at the same offset from that
/// cell's origin as its correct position has from its home cell's origin.
/// When `rotation_enabled`, each piece also starts at a uniformly random
/// quarter turn. The returned vector is finally shuffled to randomize
/// stacking order; that shuffle changes no piece data.
///
/// Generated pieces are never locked; whether a piece already rests on its
/// home slot is decided by the session that receives them.
///
/// # Examples
///
/// ```
/// use tesserae_core::{GridSize, PieceStyle};
/// use tesserae_generator::{PuzzleSeed, generate_pieces};
///
/// let grid = GridSize::new(4, 3)?;
/// let mut rng = PuzzleSeed::from_label("lighthouse").rng();
/// let pieces = generate_pieces(grid, false, PieceStyle::Classic, &mut rng);
/// assert_eq!(pieces.len(), 12);
/// assert!(pieces.iter().all(|piece| piece.rotation.is_upright()));
/// # Ok::<(), tesserae_core::GridError>(())
/// ```
pub fn generate_pieces<R>(
    grid: GridSize,
    rotation_enabled: bool,
    style: PieceStyle,
    rng: &mut R,
) -> Vec<Piece>
where
    R: Rng + ?Sized,
{
    let layouts = match style {
        PieceStyle::Classic => classic_layouts(grid),
        PieceStyle::Mosaic => mosaic_layouts(grid, rng),
    };
    let slots = scatter_cells(grid, rng);

    let mut pieces: Vec<_> = layouts
        .into_iter()
        .zip(slots)
        .enumerate()
        .map(|(index, (layout, slot))| {
            let id = PieceId::from_index(index);
            let offset = layout.correct - grid.cell_origin(grid.cell_at(index));
            let rotation = if rotation_enabled {
                Rotation::ALL[rng.random_range(0..Rotation::ALL.len())]
            } else {
                Rotation::Deg0
            };
            Piece {
                id,
                correct: layout.correct,
                current: grid.cell_origin(slot) + offset,
                width: layout.width,
                height: layout.height,
                rotation,
                locked: false,
                group: id.into(),
                shape: layout.shape,
            }
        })
        .collect();

    fisher_yates(&mut pieces, rng);
    pieces
}

fn classic_layouts(grid: GridSize) -> Vec<Layout> {
    grid.cells()
        .map(|cell| Layout {
            correct: grid.cell_origin(cell),
            width: grid.cell_width(),
            height: grid.cell_height(),
            shape: PieceShape::Classic {
                background: Point::new(
                    background_offset(cell.col, grid.cols()),
                    background_offset(cell.row, grid.rows()),
                ),
            },
        })
        .collect()
}

/// Percentage background position showing slice `index` of `count`.
///
/// A single slice shows the whole image at offset zero.
fn background_offset(index: i32, count: u16) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    f64::from(index) * BOARD_EXTENT / f64::from(count - 1)
}

/// Lattice of piece corners, `(cols + 1) × (rows + 1)`, row-major.
struct Vertices {
    stride: usize,
    points: Vec<Point>,
}

impl Vertices {
    fn jittered<R>(grid: GridSize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let (cols, rows) = (i32::from(grid.cols()), i32::from(grid.rows()));
        let (jitter_x, jitter_y) = (
            VERTEX_JITTER * grid.cell_width(),
            VERTEX_JITTER * grid.cell_height(),
        );
        let stride = usize::from(grid.cols()) + 1;
        let mut points = Vec::with_capacity(stride * (usize::from(grid.rows()) + 1));
        for row in 0..=rows {
            for col in 0..=cols {
                let base = grid.cell_origin(Cell::new(col, row));
                let internal = col > 0 && col < cols && row > 0 && row < rows;
                points.push(if internal {
                    base + Point::new(
                        rng.random_range(-jitter_x..=jitter_x),
                        rng.random_range(-jitter_y..=jitter_y),
                    )
                } else {
                    base
                });
            }
        }
        Self { stride, points }
    }

    #[expect(clippy::cast_sign_loss)]
    fn at(&self, col: i32, row: i32) -> Point {
        self.points[row as usize * self.stride + col as usize]
    }
}

fn mosaic_layouts<R>(grid: GridSize, rng: &mut R) -> Vec<Layout>
where
    R: Rng + ?Sized,
{
    let vertices = Vertices::jittered(grid, rng);
    let (pad_x, pad_y) = (
        MOSAIC_PADDING * grid.cell_width(),
        MOSAIC_PADDING * grid.cell_height(),
    );
    grid.cells()
        .map(|Cell { col, row }| {
            let top_left = vertices.at(col, row);
            let top_right = vertices.at(col + 1, row);
            let bottom_right = vertices.at(col + 1, row + 1);
            let bottom_left = vertices.at(col, row + 1);

            // Clockwise. Bottom and left are owned by the neighbors below and
            // to the left, so they are walked in reverse.
            let sides = [
                edge_segment(
                    grid,
                    EdgeId::Horizontal { row, col },
                    top_left,
                    top_right,
                    false,
                ),
                edge_segment(
                    grid,
                    EdgeId::Vertical { col: col + 1, row },
                    top_right,
                    bottom_right,
                    false,
                ),
                edge_segment(
                    grid,
                    EdgeId::Horizontal { row: row + 1, col },
                    bottom_right,
                    bottom_left,
                    true,
                ),
                edge_segment(
                    grid,
                    EdgeId::Vertical { col, row },
                    bottom_left,
                    top_left,
                    true,
                ),
            ];

            let view_box = Rect::bounding([top_left, top_right, bottom_right, bottom_left])
                .unwrap_or_default()
                .padded(pad_x, pad_y);
            Layout {
                correct: view_box.origin(),
                width: view_box.width,
                height: view_box.height,
                shape: PieceShape::Mosaic {
                    path: PiecePath::new(top_left, sides),
                    view_box,
                },
            }
        })
        .collect()
}

/// A generated piece set together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPuzzle {
    /// Seed the set was generated from.
    pub seed: PuzzleSeed,
    /// Grid the pieces are laid over.
    pub grid: GridSize,
    /// Piece style.
    pub style: PieceStyle,
    /// Whether pieces may be rotated.
    pub rotation_enabled: bool,
    /// The pieces in stacking order.
    pub pieces: Vec<Piece>,
}

/// Generates piece sets for one grid and style.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Difficulty, DifficultyProfile, PieceStyle};
/// use tesserae_generator::{PuzzleGenerator, PuzzleSeed};
///
/// let profile = DifficultyProfile::canonical(Difficulty::Hard);
/// let generator = PuzzleGenerator::from_profile(&profile, PieceStyle::Mosaic)?;
/// let seed = PuzzleSeed::from_label("orchard");
/// let puzzle = generator.generate_with_seed(seed);
/// assert_eq!(puzzle.pieces.len(), 49);
/// assert_eq!(puzzle, generator.generate_with_seed(seed));
/// # Ok::<(), tesserae_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleGenerator {
    grid: GridSize,
    style: PieceStyle,
    rotation_enabled: bool,
}

impl PuzzleGenerator {
    /// Creates a generator for upright pieces.
    #[must_use]
    pub fn new(grid: GridSize, style: PieceStyle) -> Self {
        Self {
            grid,
            style,
            rotation_enabled: false,
        }
    }

    /// Creates a generator matching a difficulty profile.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the profile describes an invalid grid.
    pub fn from_profile(profile: &DifficultyProfile, style: PieceStyle) -> Result<Self, GridError> {
        Ok(Self::new(profile.grid()?, style).with_rotation(profile.rotation_enabled))
    }

    /// Sets whether pieces start at random rotations.
    #[must_use]
    pub fn with_rotation(mut self, rotation_enabled: bool) -> Self {
        self.rotation_enabled = rotation_enabled;
        self
    }

    /// Returns the grid pieces are generated for.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Generates a piece set from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates the piece set selected by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GeneratedPuzzle {
        let mut rng = seed.rng();
        let pieces = generate_pieces(self.grid, self.rotation_enabled, self.style, &mut rng);
        log::debug!(
            "generated {} {} pieces on a {}x{} grid from seed {seed}",
            pieces.len(),
            self.style,
            self.grid.cols(),
            self.grid.rows(),
        );
        GeneratedPuzzle {
            seed,
            grid: self.grid,
            style: self.style,
            rotation_enabled: self.rotation_enabled,
            pieces,
        }
    }
}
