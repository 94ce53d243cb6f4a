use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use tesserae_core::{
    Cell, CellDelta, Difficulty, DifficultyTable, GridSize, GroupId, GroupSets, Piece, PieceStyle,
    Rotation,
};

use crate::{
    ResumeError, Session,
    lock::is_lock_satisfied,
    session::CELL_TOLERANCE,
};

/// Everything needed to resume a session later.
///
/// The snapshot is plain data. It is produced by [`Session::snapshot`] and
/// consumed by [`Session::resume`], which validates it before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Difficulty level; its profile is looked up again on resume.
    pub difficulty: Difficulty,
    /// Piece style.
    pub style: PieceStyle,
    /// Image reference used for rendering.
    #[serde(default)]
    pub image: Option<String>,
    /// Accumulated play time in milliseconds.
    pub elapsed_ms: u64,
    /// Hints used so far.
    #[serde(default)]
    pub hints_used: u32,
    /// Pieces in stacking order.
    pub pieces: Vec<Piece>,
}

impl Session {
    /// Captures the session state for persistence.
    ///
    /// An active drag is not part of the snapshot; the dragged group is saved
    /// at its committed cells.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty(),
            style: self.style(),
            image: self.image().map(str::to_owned),
            elapsed_ms: u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX),
            hints_used: self.hints_used(),
            pieces: self.pieces().to_vec(),
        }
    }

    /// Restores a session from a snapshot.
    ///
    /// The snapshot is checked in full before anything is built: the piece
    /// count must match the profile's grid, identities must be unique and in
    /// range, every piece must rest on its own cell with finite geometry of
    /// the session's style, lock flags must agree with the lock rule, and
    /// every group must be rigid (same cell offset from home and same
    /// rotation for all members) and either wholly locked or wholly unlocked.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResumeError`] found.
    pub fn resume(snapshot: SessionSnapshot, table: &DifficultyTable) -> Result<Self, ResumeError> {
        let SessionSnapshot {
            difficulty,
            style,
            image,
            elapsed_ms,
            hints_used,
            pieces,
        } = snapshot;
        let profile = *table.profile(difficulty);
        let grid = profile.grid()?;

        if pieces.len() != grid.len() {
            return Err(ResumeError::PieceCount {
                expected: grid.len(),
                found: pieces.len(),
            });
        }

        let mut seen = vec![false; grid.len()];
        let mut slots = vec![Cell::new(0, 0); grid.len()];
        let mut occupied = vec![false; grid.len()];
        let mut labels = vec![GroupId(0); grid.len()];
        for piece in &pieces {
            let id = piece.id;
            if id.index() >= grid.len() {
                return Err(ResumeError::IdOutOfRange { id });
            }
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(ResumeError::DuplicateId { id });
            }
            if piece.style() != style {
                return Err(ResumeError::StyleMismatch {
                    id,
                    expected: style,
                });
            }
            if !has_valid_geometry(piece, grid) {
                return Err(ResumeError::InvalidGeometry { id });
            }
            let cell = piece
                .current_cell(grid, CELL_TOLERANCE)
                .ok_or(ResumeError::OffGrid { id })?;
            if std::mem::replace(&mut occupied[grid.index_of(cell)], true) {
                return Err(ResumeError::SharedCell { cell });
            }
            if !profile.rotation_enabled && !piece.rotation.is_upright() {
                return Err(ResumeError::UnexpectedRotation { id });
            }
            if piece.locked && !is_lock_satisfied(piece, &profile) {
                return Err(ResumeError::InvalidLock { id });
            }
            slots[id.index()] = cell;
            labels[id.index()] = piece.group;
        }

        let mut shapes: HashMap<_, (CellDelta, Rotation, bool)> = HashMap::new();
        for piece in &pieces {
            let offset = slots[piece.id.index()] - piece.home_cell(grid);
            let (group_offset, group_rotation, group_locked) = *shapes
                .entry(piece.group)
                .or_insert((offset, piece.rotation, piece.locked));
            if (group_offset, group_rotation) != (offset, piece.rotation) {
                return Err(ResumeError::InconsistentGroup { group: piece.group });
            }
            if group_locked != piece.locked {
                return Err(ResumeError::PartiallyLockedGroup { group: piece.group });
            }
        }

        let groups = GroupSets::from_labels(&labels);
        let mut session = Session::assemble(difficulty, profile, grid, style, pieces, &slots, groups);
        session.set_progress(hints_used, Duration::from_millis(elapsed_ms));
        if let Some(image) = image {
            session = session.with_image(image);
        }
        log::debug!(
            "resumed {difficulty} {style} session: {} groups, {} locked",
            session.group_count(),
            session.locked_count()
        );
        Ok(session)
    }
}

/// Sizes must be finite and positive and the correct position must sit
/// within one cell of its home cell's origin. Classic pieces are anchored
/// exactly at that origin.
fn has_valid_geometry(piece: &Piece, grid: GridSize) -> bool {
    let offset = piece.anchor_offset(grid);
    let anchored = match piece.style() {
        PieceStyle::Classic => {
            offset.x.abs() <= CELL_TOLERANCE && offset.y.abs() <= CELL_TOLERANCE
        }
        PieceStyle::Mosaic => {
            offset.x.abs() <= grid.cell_width() && offset.y.abs() <= grid.cell_height()
        }
    };
    anchored
        && piece.current.is_finite()
        && piece.correct.is_finite()
        && piece.width.is_finite()
        && piece.height.is_finite()
        && piece.width > 0.0
        && piece.height > 0.0
}
