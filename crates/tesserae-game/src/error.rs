use tesserae_core::{Cell, GridError, GroupId, PieceId, PieceStyle};

/// Errors returned by pointer and rotation entry points.
///
/// Invalid drops are not errors; they revert silently and report
/// [`Gesture::Reverted`](crate::Gesture::Reverted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InteractionError {
    /// No piece has the given identity.
    #[display("no piece with id {id}")]
    UnknownPiece {
        /// The rejected identity.
        id: PieceId,
    },
    /// The piece is locked and cannot be picked up or rotated.
    #[display("piece {id} is locked")]
    PieceLocked {
        /// The locked piece.
        id: PieceId,
    },
    /// Another drag gesture is still active.
    #[display("a drag is already in progress")]
    DragInProgress,
    /// A pointer move or release arrived without a drag.
    #[display("no drag is in progress")]
    NoActiveDrag,
}

/// Errors returned when requesting a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HintError {
    /// Every hint allowed by the difficulty profile has been used.
    #[display("no hints left")]
    Exhausted,
    /// Every piece is already locked.
    #[display("the puzzle is already solved")]
    AlreadySolved,
    /// Hints cannot be applied while a group is being dragged.
    #[display("a drag is in progress")]
    DragInProgress,
    /// No unlocked group can reach its home cells.
    #[display("every unlocked group is blocked")]
    Blocked,
}

/// Reasons a saved piece collection is rejected on resume.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ResumeError {
    /// The difficulty profile describes an invalid grid.
    #[display("invalid grid: {_0}")]
    #[from]
    Grid(GridError),
    /// The number of pieces does not match the grid.
    #[display("expected {expected} pieces, found {found}")]
    PieceCount {
        /// Cells in the grid.
        expected: usize,
        /// Pieces in the saved collection.
        found: usize,
    },
    /// A piece identity lies outside the grid.
    #[display("piece id {id} is out of range")]
    IdOutOfRange {
        /// The rejected identity.
        id: PieceId,
    },
    /// Two pieces share one identity.
    #[display("duplicate piece id {id}")]
    DuplicateId {
        /// The repeated identity.
        id: PieceId,
    },
    /// A piece's shape does not match the session style.
    #[display("piece {id} is not a {expected} piece")]
    StyleMismatch {
        /// The offending piece.
        id: PieceId,
        /// The session style.
        expected: PieceStyle,
    },
    /// A piece has a non-finite or out-of-range coordinate or size.
    #[display("piece {id} has invalid geometry")]
    InvalidGeometry {
        /// The offending piece.
        id: PieceId,
    },
    /// A piece does not rest on a grid cell.
    #[display("piece {id} does not rest on a grid cell")]
    OffGrid {
        /// The offending piece.
        id: PieceId,
    },
    /// Two pieces rest on the same cell.
    #[display("more than one piece rests on cell {cell}")]
    SharedCell {
        /// The contested cell.
        cell: Cell,
    },
    /// A piece is rotated although the profile disables rotation.
    #[display("piece {id} is rotated but rotation is disabled")]
    UnexpectedRotation {
        /// The offending piece.
        id: PieceId,
    },
    /// A piece is marked locked but does not satisfy the lock rule.
    #[display("piece {id} is locked away from its correct placement")]
    InvalidLock {
        /// The offending piece.
        id: PieceId,
    },
    /// Members of one group are not rigidly aligned.
    #[display("group {group} is not rigidly aligned")]
    InconsistentGroup {
        /// The offending group label.
        group: GroupId,
    },
    /// One group mixes locked and unlocked members.
    #[display("group {group} mixes locked and unlocked pieces")]
    PartiallyLockedGroup {
        /// The offending group label.
        group: GroupId,
    },
}
