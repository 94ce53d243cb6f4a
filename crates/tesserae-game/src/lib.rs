//! Interactive jigsaw sessions.
//!
//! A [`Session`] owns one game's pieces and turns pointer gestures into
//! committed moves:
//!
//! - Drags snap to whole-cell deltas. Out-of-bounds drops and drops onto
//!   locked pieces revert silently; other pieces on target cells are swapped
//!   into the vacated cells.
//! - Short taps rotate a group a quarter turn when the profile enables
//!   rotation.
//! - After every committed change, pieces that reach their correct
//!   placement lock, and adjacent groups that fit together merge.
//!
//! The lock rule and win condition are also available as pure functions in
//! [`lock`]. Sessions round-trip through [`SessionSnapshot`] for persistence;
//! [`Session::resume`] rejects malformed snapshots as a whole, and
//! [`game_factory::resume_or_generate`] falls back to a fresh puzzle when it
//! does.
//!
//! # Examples
//!
//! ```
//! use tesserae_core::{Difficulty, DifficultyTable, PieceStyle};
//! use tesserae_game::Session;
//! use tesserae_generator::PuzzleSeed;
//!
//! let table = DifficultyTable::default();
//! let profile = *table.profile(Difficulty::Easy);
//! let mut rng = PuzzleSeed::from_label("tide pools").rng();
//! let mut session = Session::generate(Difficulty::Easy, profile, PieceStyle::Classic, &mut rng)?;
//!
//! while !session.is_solved() {
//!     if session.hint().is_err() {
//!         break;
//!     }
//! }
//!
//! let snapshot = session.snapshot();
//! let resumed = Session::resume(snapshot, &table)?;
//! assert_eq!(resumed.locked_count(), session.locked_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod game_factory;
pub mod lock;
mod session;
mod settings;
mod snapshot;

pub use self::{
    error::{HintError, InteractionError, ResumeError},
    session::{Gesture, Release, Session},
    settings::{BoardSize, InteractionSettings},
    snapshot::SessionSnapshot,
};
