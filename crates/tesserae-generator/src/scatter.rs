//! Random starting slots for pieces.

use rand::{Rng, prelude::*};
use tesserae_core::{Cell, GridSize};

/// Shuffles a slice in place, uniformly over all permutations.
///
/// # Examples
///
/// ```
/// use tesserae_generator::{PuzzleSeed, fisher_yates};
///
/// let mut rng = PuzzleSeed::from_label("deck").rng();
/// let mut values = [1, 2, 3, 4, 5];
/// fisher_yates(&mut values, &mut rng);
/// values.sort_unstable();
/// assert_eq!(values, [1, 2, 3, 4, 5]);
/// ```
pub fn fisher_yates<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a random permutation of the grid's cells.
///
/// Entry `i` is the starting slot of the piece whose home is cell `i` in
/// row-major order. Every cell appears exactly once, so the scattered layout
/// stays solvable by moving whole cells.
pub fn scatter_cells<R>(grid: GridSize, rng: &mut R) -> Vec<Cell>
where
    R: Rng + ?Sized,
{
    let mut cells: Vec<_> = grid.cells().collect();
    fisher_yates(&mut cells, rng);
    cells
}
