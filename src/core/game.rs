//! Game state module - the board state machine
//!
//! Owns the grid, the falling piece, and the drop timer, and orchestrates one
//! discrete transition at a time: gravity, manual move, rotate, hard drop,
//! swap. Every committed transition ends with a render notification to the
//! view collaborator. Callers gate input on `is_over()`; the operations
//! themselves do not re-check the flag.

use arrayvec::ArrayVec;

use crate::core::collab::{BoardView, PieceSupplier, Scoreboard};
use crate::core::grid::Grid;
use crate::core::raster::{col_of, piece_cells, row_of};
use crate::types::{
    GameAction, PieceKind, DOWN, GRID_WIDTH, LEFT, PLAY_END_COL, PLAY_START_COL, PLAY_START_ROW,
    RIGHT, SPAWN_ANCHOR,
};

/// The currently falling piece: kind, anchor index, quarter-turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub anchor: i16,
    pub rotation: i32,
}

impl FallingPiece {
    fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            anchor: SPAWN_ANCHOR,
            rotation: 0,
        }
    }

    /// Absolute cell indices covered by the piece.
    pub fn cells(&self) -> [i16; 4] {
        piece_cells(self.kind, self.anchor, self.rotation)
    }

    /// Deterministic recentering pass run after rotation, horizontal move,
    /// or a swap re-anchor.
    ///
    /// Column overflow is detected straight off the linear indices. Both
    /// sides overflowing at once only happens to the I piece rotated against
    /// a wall; it is pushed two cells away from the nearer edge. A negative
    /// row only arises from the I piece's spawn-row math and is pushed down
    /// one row. Callers still re-run the collision test afterward:
    /// recentering and validity are independent gates.
    fn move_in_bounds(&mut self) {
        let cells = self.cells();
        // Truncating `%` on purpose: an index in a negative row has a
        // negative remainder and counts as out-of-bounds-left, which is what
        // nudges a spawn-row I rotation back into the field.
        let out_left = cells.iter().any(|&idx| idx % GRID_WIDTH < PLAY_START_COL);
        let out_right = cells.iter().any(|&idx| idx % GRID_WIDTH > PLAY_END_COL);
        if out_left && out_right {
            let direction = if col_of(self.anchor) > 6 { LEFT } else { RIGHT };
            self.anchor += direction * 2;
        } else if out_right {
            self.anchor += LEFT;
        } else if out_left {
            self.anchor += RIGHT;
        }

        if cells.iter().any(|&idx| idx < 0) {
            self.anchor += DOWN;
        }
    }
}

/// Cancellable gravity timer owned by the state machine.
///
/// A millisecond countdown handle: re-armed with a freshly queried interval
/// after every gravity step, cancelled exactly once, at game over.
#[derive(Debug, Clone, Copy)]
pub struct DropTimer {
    remaining_ms: u32,
    cancelled: bool,
}

impl DropTimer {
    fn armed(interval_ms: u32) -> Self {
        Self {
            remaining_ms: interval_ms,
            cancelled: false,
        }
    }

    fn rearm(&mut self, interval_ms: u32) {
        self.remaining_ms = interval_ms;
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Advance the countdown; true when the timer fires.
    fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.cancelled {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// The board state machine.
pub struct GameState<V, S, Q> {
    grid: Grid,
    falling: FallingPiece,
    game_over: bool,
    timer: DropTimer,
    view: V,
    scoring: S,
    queue: Q,
}

impl<V: BoardView, S: Scoreboard, Q: PieceSupplier> GameState<V, S, Q> {
    /// Create a game session: draws the first piece and arms the drop timer.
    pub fn new(view: V, scoring: S, mut queue: Q) -> Self {
        let falling = FallingPiece::spawn(queue.next_piece());
        let interval = scoring.drop_interval_ms();
        Self {
            grid: Grid::new(),
            falling,
            game_over: false,
            timer: DropTimer::armed(interval),
            view,
            scoring,
            queue,
        }
    }

    /// Render the initial frame. Call once before the first tick.
    pub fn start(&mut self) {
        self.rerender();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, for scenario setup in tests and tooling.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling(&self) -> FallingPiece {
        self.falling
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn timer(&self) -> &DropTimer {
        &self.timer
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Surrender the view collaborator, ending the session.
    pub fn into_view(self) -> V {
        self.view
    }

    pub fn scoring(&self) -> &S {
        &self.scoring
    }

    /// Advance the drop timer; performs one gravity step when it fires and
    /// re-arms it with a freshly queried interval.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.timer.advance(elapsed_ms) {
            return;
        }
        self.gravity_step();
        if !self.game_over {
            let interval = self.scoring.drop_interval_ms();
            self.timer.rearm(interval);
        }
    }

    /// Dispatch a discrete input command. Callers gate on `is_over()`.
    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_piece(LEFT),
            GameAction::MoveRight => self.move_piece(RIGHT),
            GameAction::SoftDrop => self.gravity_step(),
            GameAction::RotateCw => self.rotate_piece(1),
            GameAction::RotateCcw => self.rotate_piece(-1),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Swap => self.try_swap(),
        }
    }

    /// One gravity step. A blocked descent means the piece is resting, which
    /// commits it immediately as a hard drop rather than a no-op.
    pub fn gravity_step(&mut self) {
        let descended = FallingPiece {
            anchor: self.falling.anchor + DOWN,
            ..self.falling
        };
        if !self.grid.all_empty(&descended.cells()) {
            self.hard_drop();
            return;
        }
        self.falling = descended;
        debug_assert!(self.grid.all_empty(&self.falling.cells()));
        self.rerender();
    }

    /// Horizontal move: shift, recenter, collision-check, revert on failure.
    /// The view is notified either way so the decided outcome is shown.
    pub fn move_piece(&mut self, direction: i16) {
        debug_assert!(direction == LEFT || direction == RIGHT);
        let snapshot = self.falling;
        self.falling.anchor += direction;
        self.falling.move_in_bounds();
        if !self.grid.all_empty(&self.falling.cells()) {
            self.falling = snapshot;
        }
        self.rerender();
    }

    /// Rotate by `delta` quarter turns. A complete no-op for O: its offsets
    /// are not symmetric around the anchor, so rotating them would visibly
    /// shift the piece. On collision both anchor and rotation revert
    /// together; a failed rotation must not leave a recentered anchor behind.
    pub fn rotate_piece(&mut self, delta: i32) {
        if self.falling.kind == PieceKind::O {
            return;
        }
        let snapshot = self.falling;
        self.falling.rotation += delta;
        self.falling.move_in_bounds();
        if !self.grid.all_empty(&self.falling.cells()) {
            self.falling = snapshot;
        }
        self.rerender();
    }

    /// Project the falling piece straight down; the four returned indices are
    /// its resting cells. Pure: the grid is not mutated, so the view's drop
    /// target uses the same projection.
    pub fn drop_positions(&self) -> [i16; 4] {
        let mut cells = self
            .falling
            .cells()
            .map(|idx| idx + DOWN);
        while self.grid.all_empty(&cells) {
            cells = cells.map(|idx| idx + DOWN);
        }
        cells.map(|idx| idx - DOWN)
    }

    /// Drop to the resting position and lock. Locking into the hidden spawn
    /// buffer is the game-over condition; otherwise clear lines, report the
    /// count (zero included), and spawn the next piece.
    pub fn hard_drop(&mut self) {
        let landed = self.drop_positions();
        self.grid.lock(&landed, self.falling.kind);
        if landed.iter().any(|&idx| row_of(idx) < PLAY_START_ROW) {
            self.rerender();
            self.trigger_game_over();
            return;
        }
        let cleared = self.grid.clear_full_rows();
        self.scoring.record_lines_cleared(cleared);
        self.next_piece();
        self.rerender();
    }

    /// One-way terminal transition: cancel the pending gravity tick and show
    /// the game-over screen.
    fn trigger_game_over(&mut self) {
        self.game_over = true;
        self.timer.cancel();
        self.view.show_game_over_screen();
    }

    fn next_piece(&mut self) {
        self.falling = FallingPiece::spawn(self.queue.next_piece());
    }

    /// Exchange the falling piece for the held one (or the queued one when
    /// nothing is held), at most once per spawn. The swapped-in piece keeps
    /// the current column, remapped onto the spawn row, at rotation 0, and
    /// is recentered when the wall leaves it no room at that column. A swap
    /// whose incoming piece cannot be placed collision-free is refused
    /// outright, before the supplier exchanges anything, so the held slot
    /// and the once-per-spawn latch stay untouched.
    pub fn try_swap(&mut self) {
        if !self.queue.can_swap() {
            return;
        }
        let mut candidate = FallingPiece {
            kind: self.queue.swap_preview(),
            anchor: DOWN + col_of(self.falling.anchor),
            rotation: 0,
        };
        candidate.move_in_bounds();
        if !self.grid.all_empty(&candidate.cells()) {
            return;
        }
        let kind = self.queue.swap(self.falling.kind);
        debug_assert_eq!(kind, candidate.kind);
        self.falling = candidate;
        self.rerender();
    }

    /// Notify the view of the decided state: board snapshot, falling piece,
    /// drop target, flush. Visible rows only for the piece and target.
    fn rerender(&mut self) {
        self.view.draw_board(self.grid.cells());
        self.view
            .draw_piece(self.falling.kind, &visible(self.falling.cells()));
        self.view.drop_target(&visible(self.drop_positions()));
        self.view.do_render();
    }
}

/// Restrict a cell list to the visible rows.
fn visible(cells: [i16; 4]) -> ArrayVec<i16, 4> {
    cells
        .iter()
        .copied()
        .filter(|&idx| row_of(idx) >= PLAY_START_ROW)
        .collect()
}
