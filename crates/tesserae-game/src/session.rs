use std::{collections::HashSet, time::Duration};

use rand::Rng;
use tesserae_core::{
    Cell, CellDelta, Difficulty, DifficultyProfile, GridError, GridSize, GroupSets, Piece,
    PieceId, PieceStyle, Point, Rotation,
};
use tesserae_generator::{GeneratedPuzzle, generate_pieces};

use crate::{
    BoardSize, HintError, InteractionError, InteractionSettings,
    lock::{self, is_lock_satisfied},
};

/// Tolerance, in board-percentage units, when matching a position to a cell.
pub(crate) const CELL_TOLERANCE: f64 = 1e-6;

/// What a released pointer gesture did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Gesture {
    /// A short press. The group turned a quarter clockwise if rotation is
    /// enabled; otherwise nothing changed.
    Tap {
        /// Whether any piece rotated.
        rotated: bool,
    },
    /// The group moved by a whole-cell delta.
    Moved {
        /// Cells travelled.
        delta: CellDelta,
    },
    /// The drop was out of bounds, blocked, or did not leave the starting
    /// cells. Every piece is back where it started.
    Reverted,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    /// What the gesture did.
    pub gesture: Gesture,
    /// Whether every piece is locked afterwards.
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Drag {
    members: Vec<PieceId>,
    start_pointer: Point,
    start_time: Duration,
    offset: Point,
}

/// An interactive jigsaw session.
///
/// Holds the piece collection for one game together with indexes over it:
/// which cell every piece rests on, which piece occupies every cell, and the
/// partition of pieces into groups. All mutation happens through the pointer
/// entry points ([`pointer_down`](Self::pointer_down),
/// [`pointer_move`](Self::pointer_move), [`pointer_up`](Self::pointer_up)),
/// [`rotate`](Self::rotate), and [`hint`](Self::hint).
///
/// Committed positions always sit exactly on a cell. While a group is being
/// dragged its committed positions stay untouched; the live offset is only
/// visible through [`display_position`](Self::display_position).
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tesserae_core::{Difficulty, DifficultyProfile, PieceStyle, Point};
/// use tesserae_game::Session;
/// use tesserae_generator::PuzzleSeed;
///
/// let profile = DifficultyProfile::canonical(Difficulty::Normal);
/// let mut rng = PuzzleSeed::from_label("meadow").rng();
/// let mut session = Session::generate(Difficulty::Normal, profile, PieceStyle::Classic, &mut rng)?;
///
/// // Pick up whichever piece rests in the top-left cell and drag it one cell right.
/// let id = session.hit_test(Point::new(5.0, 5.0));
/// if let Some(id) = id {
///     session.pointer_down(id, Point::new(5.0, 5.0), Duration::ZERO)?;
///     session.pointer_move(Point::new(25.0, 5.0))?;
///     let release = session.pointer_up(Point::new(25.0, 5.0), Duration::from_secs(1))?;
///     assert!(release.gesture.is_moved() || release.gesture.is_reverted());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    grid: GridSize,
    style: PieceStyle,
    image: Option<String>,
    settings: InteractionSettings,
    board: BoardSize,
    /// Pieces in stacking order, bottom first.
    pieces: Vec<Piece>,
    /// Position of each piece in `pieces`, indexed by identity.
    index: Vec<usize>,
    /// Cell each piece rests on, indexed by identity.
    slot: Vec<Cell>,
    /// Piece resting on each cell, indexed by row-major cell index.
    occupant: Vec<PieceId>,
    groups: GroupSets,
    drag: Option<Drag>,
    hints_used: u32,
    elapsed: Duration,
}

impl Session {
    /// Starts a session with freshly generated pieces.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the profile describes an invalid grid.
    pub fn generate<R>(
        difficulty: Difficulty,
        profile: DifficultyProfile,
        style: PieceStyle,
        rng: &mut R,
    ) -> Result<Self, GridError>
    where
        R: Rng + ?Sized,
    {
        let grid = profile.grid()?;
        let pieces = generate_pieces(grid, profile.rotation_enabled, style, rng);
        Ok(Self::from_generated(difficulty, profile, grid, style, pieces))
    }

    /// Starts a session from a generated puzzle.
    ///
    /// The puzzle's grid and rotation setting take precedence over the
    /// profile's; the profile supplies the snap threshold and hint allowance.
    #[must_use]
    pub fn new(difficulty: Difficulty, profile: DifficultyProfile, puzzle: GeneratedPuzzle) -> Self {
        let GeneratedPuzzle {
            seed: _,
            grid,
            style,
            rotation_enabled,
            pieces,
        } = puzzle;
        let profile = DifficultyProfile {
            rows: grid.rows(),
            cols: grid.cols(),
            rotation_enabled,
            ..profile
        };
        Self::from_generated(difficulty, profile, grid, style, pieces)
    }

    fn from_generated(
        difficulty: Difficulty,
        profile: DifficultyProfile,
        grid: GridSize,
        style: PieceStyle,
        pieces: Vec<Piece>,
    ) -> Self {
        let mut slots = vec![Cell::new(0, 0); pieces.len()];
        for piece in &pieces {
            let slot = piece.current_cell(grid, CELL_TOLERANCE);
            debug_assert!(slot.is_some(), "generated piece {} off the grid", piece.id);
            slots[piece.id.index()] = slot.unwrap_or_else(|| piece.home_cell(grid));
        }
        let groups = GroupSets::singletons(pieces.len());
        let mut session = Self::assemble(difficulty, profile, grid, style, pieces, &slots, groups);
        let locked = session.lock_all_satisfied();
        log::debug!(
            "new {difficulty} {style} session: {} pieces, {locked} already in place",
            session.pieces.len()
        );
        session
    }

    /// Builds the indexes around pieces whose slots and groups are known to
    /// be consistent.
    pub(crate) fn assemble(
        difficulty: Difficulty,
        profile: DifficultyProfile,
        grid: GridSize,
        style: PieceStyle,
        mut pieces: Vec<Piece>,
        slots: &[Cell],
        groups: GroupSets,
    ) -> Self {
        let mut index = vec![0; pieces.len()];
        let mut occupant = vec![PieceId(0); grid.len()];
        for (position, piece) in pieces.iter_mut().enumerate() {
            let id = piece.id;
            index[id.index()] = position;
            occupant[grid.index_of(slots[id.index()])] = id;
            piece.group = groups.label(id);
        }
        Self {
            difficulty,
            profile,
            grid,
            style,
            image: None,
            settings: InteractionSettings::default(),
            board: BoardSize::default(),
            pieces,
            index,
            slot: slots.to_vec(),
            occupant,
            groups,
            drag: None,
            hints_used: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the image reference carried along for rendering and persistence.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub(crate) fn set_progress(&mut self, hints_used: u32, elapsed: Duration) {
        self.hints_used = hints_used;
        self.elapsed = elapsed;
    }

    /// Returns the difficulty level.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the profile in effect.
    #[must_use]
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns the piece style.
    #[must_use]
    pub fn style(&self) -> PieceStyle {
        self.style
    }

    /// Returns the image reference, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the tap thresholds.
    #[must_use]
    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Replaces the tap thresholds.
    pub fn set_settings(&mut self, settings: InteractionSettings) {
        self.settings = settings;
    }

    /// Returns the on-screen board size.
    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        self.board
    }

    /// Sets the on-screen board size used to interpret pointer coordinates.
    ///
    /// Invalid sizes are ignored.
    pub fn set_board_size(&mut self, board: BoardSize) {
        if board.is_valid() {
            self.board = board;
        } else {
            log::warn!("ignoring invalid board size {board:?}");
        }
    }

    /// Returns every piece in stacking order, bottom first.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the piece with the given identity.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.index.get(id.index()).map(|&position| &self.pieces[position])
    }

    /// Returns the cell the piece rests on.
    #[must_use]
    pub fn slot(&self, id: PieceId) -> Option<Cell> {
        self.slot.get(id.index()).copied()
    }

    /// Returns the piece resting on a cell.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        self.grid
            .contains(cell)
            .then(|| self.occupant[self.grid.index_of(cell)])
    }

    /// Returns every member of the piece's group, or an empty slice for an
    /// unknown piece.
    #[must_use]
    pub fn group_members(&self, id: PieceId) -> &[PieceId] {
        if id.index() < self.groups.len() {
            self.groups.members(id)
        } else {
            &[]
        }
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.group_count()
    }

    /// Returns the number of locked pieces.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        lock::locked_count(&self.pieces)
    }

    /// Returns `true` if every piece is locked.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        lock::is_solved(&self.pieces)
    }

    /// Returns the number of hints used.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Returns the number of hints still available.
    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.profile.hint_allowance.saturating_sub(self.hints_used)
    }

    /// Returns the accumulated play time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Adds play time. Ignored once the puzzle is solved.
    pub fn tick(&mut self, delta: Duration) {
        if !self.is_solved() {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    /// Returns `true` while a drag gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns the unlocked piece under a pointer position, if any.
    ///
    /// The position is in board pixels. Locked pieces are never hit.
    #[must_use]
    pub fn hit_test(&self, pointer: Point) -> Option<PieceId> {
        let cell = self.grid.cell_containing(self.to_board(pointer))?;
        let id = self.occupant(cell)?;
        (!self.pieces[self.index[id.index()]].locked).then_some(id)
    }

    /// Returns where a piece should be drawn, including the live offset of an
    /// active drag.
    #[must_use]
    pub fn display_position(&self, id: PieceId) -> Option<Point> {
        let piece = self.piece(id)?;
        let offset = self
            .drag
            .as_ref()
            .filter(|drag| drag.members.contains(&id))
            .map_or(Point::ZERO, |drag| drag.offset);
        Some(piece.current + offset)
    }

    /// Starts dragging the group of `id`.
    ///
    /// The group is raised to the top of the stacking order.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::DragInProgress`] if another drag is active,
    /// [`InteractionError::UnknownPiece`] for an unknown identity, and
    /// [`InteractionError::PieceLocked`] for a locked piece.
    pub fn pointer_down(
        &mut self,
        id: PieceId,
        pointer: Point,
        time: Duration,
    ) -> Result<(), InteractionError> {
        if self.drag.is_some() {
            return Err(InteractionError::DragInProgress);
        }
        self.check_unlocked(id)?;
        let members = self.groups.members(id).to_vec();
        self.raise(&members);
        self.drag = Some(Drag {
            members,
            start_pointer: pointer,
            start_time: time,
            offset: Point::ZERO,
        });
        Ok(())
    }

    /// Updates the live offset of the dragged group.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NoActiveDrag`] if no drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Result<(), InteractionError> {
        let offset = {
            let drag = self.drag.as_ref().ok_or(InteractionError::NoActiveDrag)?;
            self.to_board(pointer - drag.start_pointer)
        };
        if let Some(drag) = &mut self.drag {
            drag.offset = offset;
        }
        Ok(())
    }

    /// Ends the active drag.
    ///
    /// A short, nearly stationary press counts as a tap and rotates the
    /// group. Anything else is a drop: the pointer travel is rounded to a
    /// whole-cell delta and the group moves there if every member lands on
    /// the board and no target cell is blocked. Pieces of other groups
    /// sitting on target cells are swapped into the cells the group vacates.
    /// After a committed tap or drop, lock flags are updated and adjacent
    /// groups that fit together are merged.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NoActiveDrag`] if no drag is active.
    pub fn pointer_up(&mut self, pointer: Point, time: Duration) -> Result<Release, InteractionError> {
        let drag = self.drag.take().ok_or(InteractionError::NoActiveDrag)?;
        let travel = pointer - drag.start_pointer;
        let duration = time.saturating_sub(drag.start_time);

        let gesture = if self.settings.is_tap(travel.length(), duration) {
            Gesture::Tap {
                rotated: self.rotate_group(&drag.members),
            }
        } else {
            let delta = self.grid.round_delta(
                travel.x / self.board.width,
                travel.y / self.board.height,
            );
            if !delta.is_zero() && self.try_move(&drag.members, delta) {
                self.settle(&drag.members);
                Gesture::Moved { delta }
            } else {
                Gesture::Reverted
            }
        };

        log::trace!("gesture on group of {}: {gesture:?}", drag.members[0]);
        Ok(Release {
            gesture,
            solved: self.is_solved(),
        })
    }

    /// Abandons the active drag without committing anything.
    ///
    /// Returns `false` if no drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Rotates the group of `id` a quarter turn clockwise.
    ///
    /// Returns `false` without changing anything when the profile disables
    /// rotation.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::DragInProgress`] if a drag is active,
    /// [`InteractionError::UnknownPiece`] for an unknown identity, and
    /// [`InteractionError::PieceLocked`] for a locked piece.
    pub fn rotate(&mut self, id: PieceId) -> Result<bool, InteractionError> {
        if self.drag.is_some() {
            return Err(InteractionError::DragInProgress);
        }
        self.check_unlocked(id)?;
        let members = self.groups.members(id).to_vec();
        Ok(self.rotate_group(&members))
    }

    /// Moves one unlocked group onto its home cells, upright.
    ///
    /// Groups are tried in order of their lowest unlocked identity; the first
    /// group that can reach home without disturbing a locked piece or another
    /// multi-piece group is moved. Returns the identity the hint was chosen
    /// for.
    ///
    /// # Errors
    ///
    /// Returns [`HintError::DragInProgress`] during a drag,
    /// [`HintError::AlreadySolved`] if every piece is locked,
    /// [`HintError::Exhausted`] when no hints remain, and
    /// [`HintError::Blocked`] if no group can be moved home.
    pub fn hint(&mut self) -> Result<PieceId, HintError> {
        if self.drag.is_some() {
            return Err(HintError::DragInProgress);
        }
        if self.is_solved() {
            return Err(HintError::AlreadySolved);
        }
        if self.hints_remaining() == 0 {
            return Err(HintError::Exhausted);
        }

        let mut unlocked: Vec<_> = self
            .pieces
            .iter()
            .filter(|piece| !piece.locked)
            .map(|piece| piece.id)
            .collect();
        unlocked.sort_unstable();

        let mut tried = HashSet::new();
        for id in unlocked {
            if !tried.insert(self.groups.root(id)) {
                continue;
            }
            let members = self.groups.members(id).to_vec();
            let delta = self.home_cell(id) - self.slot[id.index()];
            if !self.try_move(&members, delta) {
                continue;
            }
            for &member in &members {
                self.piece_mut(member).rotation = Rotation::Deg0;
            }
            self.hints_used += 1;
            self.settle(&members);
            log::debug!(
                "hint placed group of {id} ({} pieces), {} hints left",
                members.len(),
                self.hints_remaining()
            );
            return Ok(id);
        }
        Err(HintError::Blocked)
    }

    /// Repeatedly merges the group of `id` with adjacent groups that fit it,
    /// until no more merges apply. Returns the number of merges performed.
    ///
    /// Two grid-adjacent pieces of different groups fit when their cell
    /// offset equals the offset between their home cells and their
    /// rotations are equal.
    pub fn merge_closure(&mut self, id: PieceId) -> usize {
        let mut merges = 0;
        loop {
            let mut merged = false;
            let members = self.groups.members(id).to_vec();
            for member in members {
                let cell = self.slot[member.index()];
                for delta in CellDelta::NEIGHBORS {
                    let Some(neighbor) = self.occupant(cell + delta) else {
                        continue;
                    };
                    if self.groups.same_group(member, neighbor) || !self.fits(member, neighbor, delta) {
                        continue;
                    }
                    if let Some(merge) = self.groups.union(member, neighbor) {
                        let label = self.groups.label(merge.root);
                        for absorbed in merge.absorbed {
                            self.piece_mut(absorbed).group = label;
                        }
                        merges += 1;
                        merged = true;
                    }
                }
            }
            if !merged {
                break;
            }
        }
        if merges > 0 {
            log::trace!(
                "merged {merges} groups into {} ({} pieces)",
                self.groups.label(id),
                self.groups.members(id).len()
            );
        }
        merges
    }

    fn fits(&self, a: PieceId, b: PieceId, delta: CellDelta) -> bool {
        self.home_cell(b) - self.home_cell(a) == delta
            && self.piece_ref(a).rotation == self.piece_ref(b).rotation
    }

    fn check_unlocked(&self, id: PieceId) -> Result<(), InteractionError> {
        let piece = self.piece(id).ok_or(InteractionError::UnknownPiece { id })?;
        if piece.locked {
            return Err(InteractionError::PieceLocked { id });
        }
        Ok(())
    }

    /// Rotates unlocked members; runs lock evaluation and merges afterwards.
    fn rotate_group(&mut self, members: &[PieceId]) -> bool {
        if !self.profile.rotation_enabled {
            return false;
        }
        let mut rotated = false;
        for &id in members {
            let piece = self.piece_mut(id);
            if !piece.locked {
                piece.rotation = piece.rotation.rotated_cw();
                rotated = true;
            }
        }
        if rotated {
            self.settle(members);
        }
        rotated
    }

    /// Moves `members` by `delta`, swapping displaced pieces into the vacated
    /// cells. Returns `false` without changing anything if the move is
    /// invalid.
    fn try_move(&mut self, members: &[PieceId], delta: CellDelta) -> bool {
        let Some(&leader) = members.first() else {
            return false;
        };
        let targets: Vec<_> = members
            .iter()
            .map(|id| self.slot[id.index()] + delta)
            .collect();
        let target_set: HashSet<_> = targets.iter().copied().collect();

        let mut displaced = Vec::new();
        for &target in &targets {
            let Some(occupant) = self.occupant(target) else {
                return false;
            };
            if self.groups.same_group(occupant, leader) {
                continue;
            }
            // Locked pieces and other multi-piece groups are obstacles.
            if self.piece_ref(occupant).locked || self.groups.members(occupant).len() > 1 {
                return false;
            }
            let mut vacated = target - delta;
            while target_set.contains(&vacated) {
                vacated = vacated - delta;
            }
            displaced.push((occupant, vacated));
        }

        for (&id, &target) in members.iter().zip(&targets) {
            self.place(id, target);
        }
        for &(id, cell) in &displaced {
            self.place(id, cell);
            self.lock_if_satisfied(id);
        }
        true
    }

    /// Locks satisfied members, merges, and then locks the merged group.
    fn settle(&mut self, members: &[PieceId]) {
        for &id in members {
            self.lock_if_satisfied(id);
        }
        if let Some(&leader) = members.first() {
            self.merge_closure(leader);
            for id in self.groups.members(leader).to_vec() {
                self.lock_if_satisfied(id);
            }
        }
        if self.is_solved() {
            log::info!(
                "puzzle solved in {:.1}s with {} hints",
                self.elapsed.as_secs_f64(),
                self.hints_used
            );
        }
    }

    fn place(&mut self, id: PieceId, cell: Cell) {
        self.slot[id.index()] = cell;
        self.occupant[self.grid.index_of(cell)] = id;
        let grid = self.grid;
        let piece = self.piece_mut(id);
        piece.current = piece.position_in(cell, grid);
    }

    fn lock_if_satisfied(&mut self, id: PieceId) {
        let profile = self.profile;
        let piece = self.piece_mut(id);
        if !piece.locked && is_lock_satisfied(piece, &profile) {
            piece.locked = true;
            log::trace!("piece {id} locked");
        }
    }

    fn lock_all_satisfied(&mut self) -> usize {
        let profile = self.profile;
        let mut locked = 0;
        for piece in &mut self.pieces {
            if !piece.locked && is_lock_satisfied(piece, &profile) {
                piece.locked = true;
                locked += 1;
            }
        }
        locked
    }

    fn raise(&mut self, members: &[PieceId]) {
        let (mut rest, raised): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pieces)
            .into_iter()
            .partition(|piece| !members.contains(&piece.id));
        rest.extend(raised);
        for (position, piece) in rest.iter().enumerate() {
            self.index[piece.id.index()] = position;
        }
        self.pieces = rest;
    }

    fn home_cell(&self, id: PieceId) -> Cell {
        self.grid.cell_at(id.index())
    }

    fn piece_ref(&self, id: PieceId) -> &Piece {
        &self.pieces[self.index[id.index()]]
    }

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        let position = self.index[id.index()];
        &mut self.pieces[position]
    }

    /// Converts board pixels to board-percentage units.
    fn to_board(&self, pixels: Point) -> Point {
        Point::new(
            pixels.x / self.board.width * tesserae_core::BOARD_EXTENT,
            pixels.y / self.board.height * tesserae_core::BOARD_EXTENT,
        )
    }
}
