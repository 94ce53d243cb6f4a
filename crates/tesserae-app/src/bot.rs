//! Headless autoplay.
//!
//! The bot plays through the same pointer entry points a user would: taps to
//! turn a group upright, then a drag whose pixel travel carries the group's
//! lowest piece onto its home cell.

use std::time::Duration;

use tesserae_core::{Cell, PieceId, Point};
use tesserae_game::{Gesture, Session};

use crate::AppError;

const TAP_DURATION: Duration = Duration::from_millis(40);
const DRAG_DURATION: Duration = Duration::from_millis(600);

/// Statistics from an autoplay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotReport {
    /// Drags that moved a group.
    pub moves: usize,
    /// Drags that were reverted.
    pub reverted: usize,
    /// Taps issued to rotate groups.
    pub taps: usize,
    /// Hints used when every group was blocked.
    pub hints: usize,
    /// Whether the puzzle ended solved.
    pub solved: bool,
}

/// Plays the session until it is solved, stuck, or `max_moves` drags have
/// been attempted.
///
/// Candidates are tried in order of their lowest unlocked piece. When no
/// group can be dragged home the bot falls back to a hint; with no hints
/// left it stops.
pub fn autoplay(session: &mut Session, max_moves: usize) -> Result<BotReport, AppError> {
    let mut report = BotReport::default();
    let mut clock = Duration::ZERO;

    while !session.is_solved() && report.moves + report.reverted < max_moves {
        let mut progressed = false;
        for id in candidates(session) {
            turn_upright(session, id, &mut clock, &mut report)?;
            if session.piece(id).is_some_and(|piece| piece.locked) {
                progressed = true;
                break;
            }
            if drag_home(session, id, &mut clock)? {
                report.moves += 1;
                progressed = true;
                break;
            }
            report.reverted += 1;
        }
        if progressed {
            continue;
        }
        if session.hints_remaining() == 0 {
            log::warn!("autoplay stuck with {} pieces unlocked", unlocked(session));
            break;
        }
        let id = session.hint()?;
        log::debug!("autoplay used a hint on piece {id}");
        report.hints += 1;
    }

    report.solved = session.is_solved();
    log::info!(
        "autoplay finished: {} moves, {} reverted, {} taps, {} hints, solved={}",
        report.moves,
        report.reverted,
        report.taps,
        report.hints,
        report.solved
    );
    Ok(report)
}

/// The lowest unlocked piece of every unlocked group.
fn candidates(session: &Session) -> Vec<PieceId> {
    let mut ids: Vec<_> = session
        .pieces()
        .iter()
        .filter(|piece| !piece.locked)
        .map(|piece| piece.id)
        .filter(|&id| session.group_members(id).iter().min() == Some(&id))
        .collect();
    ids.sort_unstable();
    ids
}

fn unlocked(session: &Session) -> usize {
    session.pieces().len() - session.locked_count()
}

fn turn_upright(
    session: &mut Session,
    id: PieceId,
    clock: &mut Duration,
    report: &mut BotReport,
) -> Result<(), AppError> {
    if !session.profile().rotation_enabled {
        return Ok(());
    }
    while let Some(piece) = session.piece(id) {
        if piece.locked || piece.rotation.is_upright() {
            break;
        }
        let Some(slot) = session.slot(id) else {
            break;
        };
        let point = pixel_center(session, slot);
        session.pointer_down(id, point, *clock)?;
        *clock += TAP_DURATION;
        let release = session.pointer_up(point, *clock)?;
        report.taps += 1;
        if release.gesture != (Gesture::Tap { rotated: true }) {
            break;
        }
    }
    Ok(())
}

fn drag_home(session: &mut Session, id: PieceId, clock: &mut Duration) -> Result<bool, AppError> {
    let grid = session.grid();
    let Some(home) = session.piece(id).map(|piece| piece.home_cell(grid)) else {
        return Ok(false);
    };
    let Some(slot) = session.slot(id) else {
        return Ok(false);
    };
    let start = pixel_center(session, slot);
    let end = pixel_center(session, home);

    session.pointer_down(id, start, *clock)?;
    // A few intermediate moves, as a pointer would report them.
    for step in 1..=4 {
        let t = f64::from(step) / 4.0;
        session.pointer_move(start + (end - start) * t)?;
    }
    *clock += DRAG_DURATION;
    let release = session.pointer_up(end, *clock)?;
    session.tick(DRAG_DURATION);
    Ok(release.gesture.is_moved())
}

fn pixel_center(session: &Session, cell: Cell) -> Point {
    let grid = session.grid();
    let board = session.board_size();
    Point::new(
        (f64::from(cell.col) + 0.5) * board.width / f64::from(grid.cols()),
        (f64::from(cell.row) + 0.5) * board.height / f64::from(grid.rows()),
    )
}
