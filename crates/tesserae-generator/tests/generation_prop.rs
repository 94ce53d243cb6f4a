//! Property tests for piece generation.
//!
//! Invariants covered:
//! - Identities partition `0..rows * cols` for every grid and style.
//! - Scattered slots form a permutation of the grid cells.
//! - Neighboring mosaic pieces trace identical curves along shared edges.
//! - Mosaic borders are straight and view boxes exceed the raw cell size.

use proptest::prelude::*;
use tesserae_core::{
    Cell, GridSize, PathSegment, Piece, PiecePath, PieceShape, PieceStyle, Point, Side,
};
use tesserae_generator::{PuzzleSeed, generate_pieces};

const TOLERANCE: f64 = 1e-9;

fn seed_from(bytes: [u8; 32]) -> PuzzleSeed {
    PuzzleSeed::from_bytes(bytes)
}

fn by_id(mut pieces: Vec<Piece>) -> Vec<Piece> {
    pieces.sort_by_key(|piece| piece.id);
    pieces
}

fn mosaic_path(piece: &Piece) -> &PiecePath {
    match &piece.shape {
        PieceShape::Mosaic { path, .. } => path,
        PieceShape::Classic { .. } => panic!("piece {} is not a mosaic piece", piece.id),
    }
}

/// Start, control points, and end of one side, in tracing order.
fn side_points(path: &PiecePath, side: Side) -> Vec<Point> {
    let mut points = vec![path.side_start(side)];
    points.extend(path.side(side).points());
    points
}

fn same_points_reversed(forward: &[Point], backward: &[Point]) -> bool {
    forward.len() == backward.len()
        && forward
            .iter()
            .zip(backward.iter().rev())
            .all(|(a, b)| a.approx_eq(*b, TOLERANCE))
}

fn grid_strategy() -> impl Strategy<Value = GridSize> {
    (1_u16..=9, 1_u16..=9).prop_map(|(cols, rows)| GridSize::new(cols, rows).unwrap())
}

fn style_strategy() -> impl Strategy<Value = PieceStyle> {
    prop_oneof![Just(PieceStyle::Classic), Just(PieceStyle::Mosaic)]
}

proptest! {
    #[test]
    fn identities_partition_the_grid(
        grid in grid_strategy(),
        style in style_strategy(),
        rotation in any::<bool>(),
        seed in any::<[u8; 32]>(),
    ) {
        let pieces = generate_pieces(grid, rotation, style, &mut seed_from(seed).rng());
        prop_assert_eq!(pieces.len(), grid.len());
        let ids: Vec<_> = by_id(pieces).iter().map(|piece| piece.id.index()).collect();
        prop_assert_eq!(ids, (0..grid.len()).collect::<Vec<_>>());
    }

    #[test]
    fn scattered_slots_are_a_permutation(
        grid in grid_strategy(),
        style in style_strategy(),
        seed in any::<[u8; 32]>(),
    ) {
        let pieces = generate_pieces(grid, false, style, &mut seed_from(seed).rng());
        let mut slots = Vec::new();
        for piece in &pieces {
            let slot = piece.current_cell(grid, TOLERANCE);
            prop_assert!(slot.is_some(), "piece {} rests between cells", piece.id);
            slots.extend(slot);
        }
        slots.sort();
        let mut cells: Vec<_> = grid.cells().collect();
        cells.sort();
        prop_assert_eq!(slots, cells);
    }

    #[test]
    fn shared_edges_are_congruent(grid in grid_strategy(), seed in any::<[u8; 32]>()) {
        let pieces = by_id(generate_pieces(grid, true, PieceStyle::Mosaic, &mut seed_from(seed).rng()));
        let path_at = |cell: Cell| mosaic_path(&pieces[grid.index_of(cell)]);
        for cell in grid.cells() {
            let right = Cell::new(cell.col + 1, cell.row);
            if grid.contains(right) {
                prop_assert!(same_points_reversed(
                    &side_points(path_at(cell), Side::Right),
                    &side_points(path_at(right), Side::Left),
                ));
            }
            let below = Cell::new(cell.col, cell.row + 1);
            if grid.contains(below) {
                prop_assert!(same_points_reversed(
                    &side_points(path_at(below), Side::Top),
                    &side_points(path_at(cell), Side::Bottom),
                ));
            }
        }
    }

    #[test]
    fn mosaic_borders_are_straight(grid in grid_strategy(), seed in any::<[u8; 32]>()) {
        let pieces = generate_pieces(grid, false, PieceStyle::Mosaic, &mut seed_from(seed).rng());
        let last_col = i32::from(grid.cols()) - 1;
        let last_row = i32::from(grid.rows()) - 1;
        for piece in &pieces {
            let Cell { col, row } = piece.home_cell(grid);
            let path = mosaic_path(piece);
            let on_border = [
                (Side::Top, row == 0),
                (Side::Right, col == last_col),
                (Side::Bottom, row == last_row),
                (Side::Left, col == 0),
            ];
            for (side, border) in on_border {
                prop_assert_eq!(path.side(side).is_line(), border);
            }
            prop_assert!(path.is_closed(TOLERANCE));
        }
    }
}

#[test]
fn two_by_two_mosaic_with_rotation() {
    let grid = GridSize::new(2, 2).unwrap();
    let seed = PuzzleSeed::from_label("two by two");
    let pieces = generate_pieces(grid, true, PieceStyle::Mosaic, &mut seed.rng());
    assert_eq!(pieces.len(), 4);
    for piece in &pieces {
        let PieceShape::Mosaic { path, view_box } = &piece.shape else {
            panic!("expected a mosaic piece");
        };
        assert!(!path.to_string().is_empty());
        assert!(path.to_string().starts_with('M'));
        assert!(view_box.width > grid.cell_width());
        assert!(view_box.height > grid.cell_height());
        assert_eq!(view_box.origin(), piece.correct);
        // Each cell of a 2x2 grid has exactly two border sides.
        let straight = path
            .sides()
            .iter()
            .filter(|segment| matches!(segment, PathSegment::Line { .. }))
            .count();
        assert_eq!(straight, 2);
        for point in path.points() {
            assert!(view_box.contains(point), "{point} outside {view_box:?}");
        }
    }
}

#[test]
fn generation_is_deterministic_per_seed() {
    let grid = GridSize::new(6, 4).unwrap();
    let seed = PuzzleSeed::from_label("determinism");
    let a = generate_pieces(grid, true, PieceStyle::Mosaic, &mut seed.rng());
    let b = generate_pieces(grid, true, PieceStyle::Mosaic, &mut seed.rng());
    assert_eq!(a, b);
    let c = generate_pieces(
        grid,
        true,
        PieceStyle::Mosaic,
        &mut PuzzleSeed::from_label("other").rng(),
    );
    assert_ne!(a, c);
}
