//! Starting sessions from saved state or from scratch.

use tesserae_core::{Difficulty, DifficultyTable, GridError, PieceStyle};
use tesserae_generator::{PuzzleGenerator, PuzzleSeed};

use crate::{Session, SessionSnapshot};

/// Parameters for a freshly generated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    /// Difficulty level; its profile is looked up in the table.
    pub difficulty: Difficulty,
    /// Piece style.
    pub style: PieceStyle,
    /// Seed for piece generation.
    pub seed: PuzzleSeed,
    /// Image reference used for rendering.
    pub image: Option<String>,
}

impl NewGame {
    /// Creates parameters with the seed derived from the image reference.
    #[must_use]
    pub fn for_image(difficulty: Difficulty, style: PieceStyle, image: impl Into<String>) -> Self {
        let image = image.into();
        Self {
            difficulty,
            style,
            seed: PuzzleSeed::from_label(&image),
            image: Some(image),
        }
    }
}

/// Generates a new session.
///
/// # Errors
///
/// Returns [`GridError`] if the table's profile describes an invalid grid.
pub fn generate_session(game: &NewGame, table: &DifficultyTable) -> Result<Session, GridError> {
    let profile = *table.profile(game.difficulty);
    let puzzle = PuzzleGenerator::from_profile(&profile, game.style)?.generate_with_seed(game.seed);
    log::info!(
        "starting {} {} puzzle {}",
        game.difficulty,
        game.style,
        puzzle.seed
    );
    let session = Session::new(game.difficulty, profile, puzzle);
    Ok(match &game.image {
        Some(image) => session.with_image(image.clone()),
        None => session,
    })
}

/// Resumes a saved session, or generates a new one if there is nothing to
/// resume or the snapshot is rejected.
///
/// A rejected snapshot is logged and discarded; it is never partially
/// applied.
///
/// # Errors
///
/// Returns [`GridError`] if a new session is needed and the table's profile
/// describes an invalid grid.
///
/// # Examples
///
/// ```
/// use tesserae_core::{Difficulty, DifficultyTable, PieceStyle};
/// use tesserae_game::game_factory::{self, NewGame};
///
/// let table = DifficultyTable::default();
/// let game = NewGame::for_image(Difficulty::Easy, PieceStyle::Mosaic, "lighthouse.jpg");
/// let session = game_factory::resume_or_generate(None, &table, &game)?;
///
/// let mut snapshot = session.snapshot();
/// snapshot.pieces.pop();
/// let fresh = game_factory::resume_or_generate(Some(snapshot), &table, &game)?;
/// assert_eq!(fresh.pieces().len(), 9);
/// # Ok::<(), tesserae_core::GridError>(())
/// ```
pub fn resume_or_generate(
    snapshot: Option<SessionSnapshot>,
    table: &DifficultyTable,
    fallback: &NewGame,
) -> Result<Session, GridError> {
    if let Some(snapshot) = snapshot {
        match Session::resume(snapshot, table) {
            Ok(session) => return Ok(session),
            Err(err) => log::warn!("discarding saved session: {err}"),
        }
    }
    generate_session(fallback, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> NewGame {
        NewGame::for_image(Difficulty::Normal, PieceStyle::Classic, "orchard.png")
    }

    #[test]
    fn test_same_seed_same_session() {
        let table = DifficultyTable::default();
        let a = generate_session(&game(), &table).unwrap();
        let b = generate_session(&game(), &table).unwrap();
        assert_eq!(a.pieces(), b.pieces());
        assert_eq!(a.image(), Some("orchard.png"));
    }

    #[test]
    fn test_resume_keeps_valid_snapshot() {
        let table = DifficultyTable::default();
        let mut session = generate_session(&game(), &table).unwrap();
        session.tick(std::time::Duration::from_secs(5));
        let resumed = resume_or_generate(Some(session.snapshot()), &table, &game()).unwrap();
        assert_eq!(resumed.elapsed(), std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_rejected_snapshot_falls_back() {
        let table = DifficultyTable::default();
        let session = generate_session(&game(), &table).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.pieces[0].current.x = f64::INFINITY;
        snapshot.elapsed_ms = 9_000;
        let fresh = resume_or_generate(Some(snapshot), &table, &game()).unwrap();
        assert_eq!(fresh.elapsed(), std::time::Duration::ZERO);
        assert_eq!(fresh.pieces(), session.pieces());
    }

    #[test]
    fn test_invalid_profile_is_an_error() {
        let mut table = DifficultyTable::default();
        let mut profile = *table.profile(Difficulty::Normal);
        profile.rows = 0;
        table.set_profile(Difficulty::Normal, profile);
        assert!(resume_or_generate(None, &table, &game()).is_err());
    }
}
