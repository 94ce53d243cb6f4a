use std::{collections::HashSet, time::Duration};

use proptest::prelude::*;
use tesserae_core::{Difficulty, DifficultyProfile, PieceId, PieceStyle, Point};
use tesserae_game::{BoardSize, Session};
use tesserae_generator::PuzzleSeed;

#[derive(Debug, Clone)]
enum Action {
    Drag { cell: usize, dx: f64, dy: f64 },
    Tap { cell: usize },
    Hint,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..25usize, -450.0..450.0f64, -450.0..450.0f64)
            .prop_map(|(cell, dx, dy)| Action::Drag { cell, dx, dy }),
        2 => (0..25usize).prop_map(|cell| Action::Tap { cell }),
        1 => Just(Action::Hint),
    ]
}

fn session(label: &str, style: PieceStyle, rotation_enabled: bool) -> Session {
    let profile = DifficultyProfile {
        rotation_enabled,
        ..DifficultyProfile::canonical(Difficulty::Normal)
    };
    let mut rng = PuzzleSeed::from_label(label).rng();
    let mut session = Session::generate(Difficulty::Normal, profile, style, &mut rng).unwrap();
    session.set_board_size(BoardSize::new(500.0, 500.0));
    session
}

fn cell_center(session: &Session, index: usize) -> Point {
    let cell = session.grid().cell_at(index);
    Point::new(
        f64::from(cell.col) * 100.0 + 50.0,
        f64::from(cell.row) * 100.0 + 50.0,
    )
}

fn apply(session: &mut Session, action: &Action) {
    match *action {
        Action::Drag { cell, dx, dy } => {
            let start = cell_center(session, cell);
            let Some(id) = session.hit_test(start) else {
                return;
            };
            session.pointer_down(id, start, Duration::ZERO).unwrap();
            let end = start + Point::new(dx, dy);
            session.pointer_move(end).unwrap();
            session.pointer_up(end, Duration::from_secs(1)).unwrap();
        }
        Action::Tap { cell } => {
            let start = cell_center(session, cell);
            let Some(id) = session.hit_test(start) else {
                return;
            };
            session.pointer_down(id, start, Duration::ZERO).unwrap();
            session.pointer_up(start, Duration::from_millis(50)).unwrap();
        }
        Action::Hint => {
            let _ = session.hint();
        }
    }
}

/// Checks the structural invariants that every committed state must hold.
fn check_invariants(session: &Session) -> Result<(), TestCaseError> {
    let grid = session.grid();
    let profile = *session.profile();

    let mut cells = HashSet::new();
    for piece in session.pieces() {
        let slot = session.slot(piece.id).unwrap();
        prop_assert!(cells.insert(slot), "two pieces on {}", slot);
        prop_assert_eq!(session.occupant(slot), Some(piece.id));
        prop_assert!(piece.current.approx_eq(piece.position_in(slot, grid), 1e-9));
        if !profile.rotation_enabled {
            prop_assert!(piece.rotation.is_upright());
        }
        if piece.locked {
            prop_assert_eq!(slot, piece.home_cell(grid));
        }
    }
    prop_assert_eq!(cells.len(), grid.len());

    for piece in session.pieces() {
        let members = session.group_members(piece.id);
        let offset = session.slot(piece.id).unwrap() - piece.home_cell(grid);
        for &member in members {
            let other = session.piece(member).unwrap();
            prop_assert_eq!(other.group, piece.group);
            prop_assert_eq!(other.rotation, piece.rotation);
            prop_assert_eq!(other.locked, piece.locked);
            prop_assert_eq!(
                session.slot(member).unwrap() - other.home_cell(grid),
                offset
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn gestures_preserve_board_invariants(
        label in "[a-z]{4,8}",
        mosaic in any::<bool>(),
        rotation_enabled in any::<bool>(),
        actions in prop::collection::vec(action(), 1..40),
    ) {
        let style = if mosaic { PieceStyle::Mosaic } else { PieceStyle::Classic };
        let mut session = session(&label, style, rotation_enabled);
        check_invariants(&session)?;

        let mut locked: HashSet<PieceId> = HashSet::new();
        let mut groups = session.group_count();
        for action in &actions {
            apply(&mut session, action);
            check_invariants(&session)?;

            // Locks and merges are permanent.
            let now: HashSet<_> = session
                .pieces()
                .iter()
                .filter(|piece| piece.locked)
                .map(|piece| piece.id)
                .collect();
            prop_assert!(locked.is_subset(&now));
            locked = now;
            prop_assert!(session.group_count() <= groups);
            groups = session.group_count();
        }
    }

    #[test]
    fn hints_never_exceed_allowance(
        label in "[a-z]{4,8}",
        requests in 1..10usize,
    ) {
        let mut session = session(&label, PieceStyle::Classic, false);
        let allowance = session.profile().hint_allowance;
        for _ in 0..requests {
            let _ = session.hint();
        }
        prop_assert!(session.hints_used() <= allowance);
        prop_assert_eq!(
            session.hints_used(),
            u32::try_from(requests).unwrap().min(allowance)
        );
    }
}
