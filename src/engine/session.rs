//! Falling-block session - the per-round state machine of the stacking game
//!
//! Wires the grid, the piece tables, gravity timing, and scoring together.
//! Input arrives as pre-translated direction codes; everything the host needs
//! to know flows back out through the game context. The session holds no
//! clock of its own: the host drives it with elapsed milliseconds, and
//! pausing is simply the absence of ticks.

use log::debug;

use crate::core::grid::StackGrid;
use crate::core::pieces;
use crate::core::rng::RandomSource;
use crate::core::scoring;
use crate::engine::events::GameContext;
use crate::types::{Direction, PieceId, PieceKind, Rotation};

/// The piece currently falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i32,
    pub row: i32,
    pub id: PieceId,
}

impl ActivePiece {
    pub fn cells(&self) -> [(i32, i32); 4] {
        pieces::cells_at(self.kind, self.rotation, self.col, self.row)
    }
}

/// One round of the falling-block game.
#[derive(Debug)]
pub struct FallingBlockSession {
    grid: StackGrid,
    active: Option<ActivePiece>,
    next_piece_id: PieceId,
    rows_cleared_total: u32,
    fall_timer_ms: u32,
    started: bool,
    game_over: bool,
}

impl FallingBlockSession {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: StackGrid::new(width, height),
            active: None,
            next_piece_id: 0,
            rows_cleared_total: 0,
            fall_timer_ms: 0,
            started: false,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &StackGrid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared_total
    }

    pub fn level(&self) -> u32 {
        scoring::level_for_rows(self.rows_cleared_total)
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Begin a round: empty grid, fresh counters, first piece. Also restarts
    /// a finished round.
    pub fn start(&mut self, rng: &mut dyn RandomSource, ctx: &mut GameContext) {
        self.grid.clear();
        self.active = None;
        self.rows_cleared_total = 0;
        self.fall_timer_ms = 0;
        self.game_over = false;
        self.started = true;
        self.spawn_piece(rng, ctx);
    }

    /// Apply one translated input code. Returns whether the piece moved.
    pub fn apply_direction(
        &mut self,
        direction: Direction,
        rng: &mut dyn RandomSource,
        ctx: &mut GameContext,
    ) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        match direction {
            Direction::Left => self.try_shift(-1),
            Direction::Right => self.try_shift(1),
            Direction::Up => self.try_rotate(),
            Direction::Down => {
                // A manual drop restarts the gravity wait, as if the piece
                // had just fallen on its own.
                self.fall_timer_ms = 0;
                self.descend(rng, ctx)
            }
        }
    }

    /// Advance gravity. The piece falls one row whenever the level's fall
    /// interval elapses; a blocked fall locks it.
    pub fn tick(&mut self, elapsed_ms: u32, rng: &mut dyn RandomSource, ctx: &mut GameContext) {
        if !self.started || self.game_over || self.active.is_none() {
            return;
        }
        self.fall_timer_ms += elapsed_ms;
        let interval = scoring::fall_interval_ms(self.level());
        while self.fall_timer_ms >= interval {
            self.fall_timer_ms -= interval;
            if !self.descend(rng, ctx) {
                self.fall_timer_ms = 0;
                break;
            }
        }
    }

    fn try_shift(&mut self, dcol: i32) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        piece.col += dcol;
        self.apply_if_valid(piece)
    }

    fn try_rotate(&mut self) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        piece.rotation = pieces::next_rotation(piece.kind, piece.rotation);
        self.apply_if_valid(piece)
    }

    /// Commit the transformed piece, or leave the previous one in place.
    fn apply_if_valid(&mut self, piece: ActivePiece) -> bool {
        if self.grid.is_valid_placement(&piece.cells(), piece.id) {
            self.grid.commit(&piece.cells(), piece.id);
            self.active = Some(piece);
            true
        } else {
            false
        }
    }

    /// Drop one row. A blocked drop means the piece has landed: it locks,
    /// completed rows clear, and the next piece spawns.
    fn descend(&mut self, rng: &mut dyn RandomSource, ctx: &mut GameContext) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        piece.row -= 1;
        if self.apply_if_valid(piece) {
            true
        } else {
            self.lock_piece(rng, ctx);
            false
        }
    }

    fn lock_piece(&mut self, rng: &mut dyn RandomSource, ctx: &mut GameContext) {
        self.active = None;
        ctx.add_score(scoring::piece_lock_points());

        let cleared = self.grid.clear_full_rows();
        if !cleared.is_empty() {
            self.rows_cleared_total += cleared.len() as u32;
            ctx.rows_cleared(cleared.len() as u32);
        }

        self.spawn_piece(rng, ctx);
    }

    /// Spawn the next piece, uniformly chosen. A spawn that collides with the
    /// stack means the well has topped out: the round is over.
    fn spawn_piece(&mut self, rng: &mut dyn RandomSource, ctx: &mut GameContext) {
        let kind = PieceKind::ALL[rng.uniform_int(0, PieceKind::ALL.len() as i32) as usize];
        let (col, row) = pieces::spawn_origin(self.grid.width(), self.grid.height());
        let piece = ActivePiece {
            kind,
            rotation: Rotation::North,
            col,
            row,
            id: self.next_piece_id,
        };
        self.next_piece_id += 1;

        if !self.grid.is_valid_placement(&piece.cells(), piece.id) {
            debug!("spawn blocked at piece {}, round over", piece.id);
            self.game_over = true;
            ctx.game_over();
            return;
        }
        self.grid.commit(&piece.cells(), piece.id);
        self.active = Some(piece);
    }
}
