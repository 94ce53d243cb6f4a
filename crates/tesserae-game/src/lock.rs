//! Lock rule and win detection.
//!
//! These are pure functions over piece data so that callers holding a bare
//! piece collection, such as a persistence layer, can evaluate them without a
//! session.

use tesserae_core::{DifficultyProfile, Piece};

/// Returns `true` if the piece sits close enough to its correct position,
/// upright when the profile enables rotation.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Difficulty, DifficultyProfile, GridSize, PieceStyle};
/// use tesserae_game::lock;
/// use tesserae_generator::{PuzzleSeed, generate_pieces};
///
/// let profile = DifficultyProfile::canonical(Difficulty::Easy);
/// let mut rng = PuzzleSeed::from_label("lock").rng();
/// let mut pieces = generate_pieces(profile.grid()?, false, PieceStyle::Classic, &mut rng);
/// pieces[0].current = pieces[0].correct;
/// assert!(lock::is_lock_satisfied(&pieces[0], &profile));
/// # Ok::<(), tesserae_core::GridError>(())
/// ```
#[must_use]
pub fn is_lock_satisfied(piece: &Piece, profile: &DifficultyProfile) -> bool {
    piece.distance_to_correct() <= profile.snap_threshold
        && (!profile.rotation_enabled || piece.rotation.is_upright())
}

/// Recomputes every piece's lock flag from scratch.
///
/// Unlike lock evaluation inside a session, this may also clear locks.
pub fn refresh_locks(pieces: &mut [Piece], profile: &DifficultyProfile) {
    for piece in pieces {
        piece.locked = is_lock_satisfied(piece, profile);
    }
}

/// Returns `true` if every piece is locked.
#[must_use]
pub fn is_solved(pieces: &[Piece]) -> bool {
    pieces.iter().all(|piece| piece.locked)
}

/// Returns the number of locked pieces.
#[must_use]
pub fn locked_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|piece| piece.locked).count()
}
