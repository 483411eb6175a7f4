//! Collaborator contracts consumed by the state machine
//!
//! The state machine drives three collaborators and never owns their
//! policies: a view it notifies after every transition, a scoreboard that
//! owns score/level formulas and the gravity interval, and a piece supplier
//! that owns randomization and the swap slot. Collaborators are only ever
//! called; none of them calls back into a mutating operation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{Cell, PieceKind};

/// Render sink notified once per completed transition, in call order:
/// `draw_board`, `draw_piece`, `drop_target`, `do_render`.
pub trait BoardView {
    /// Full placed-cell snapshot, including sentinels and hidden rows.
    fn draw_board(&mut self, cells: &[Cell]);
    /// The falling piece's cells, restricted to visible rows.
    fn draw_piece(&mut self, kind: PieceKind, cells: &[i16]);
    /// Where the falling piece would land, restricted to visible rows.
    fn drop_target(&mut self, cells: &[i16]);
    /// Flush the frame.
    fn do_render(&mut self);
    fn show_game_over_screen(&mut self);
}

/// Score/level owner. The state machine reports cleared lines once per hard
/// drop (zero included) and re-reads the gravity interval every tick.
pub trait Scoreboard {
    fn record_lines_cleared(&mut self, count: u32);
    fn drop_interval_ms(&self) -> u32;
}

/// Upcoming-piece and swap-slot owner. `next_piece` re-arms the swap latch;
/// `swap` trips it, so at most one swap succeeds per spawn.
pub trait PieceSupplier {
    fn next_piece(&mut self) -> PieceKind;
    fn can_swap(&self) -> bool;
    /// The kind `swap` would hand out, without exchanging anything. The state
    /// machine uses this to test the incoming piece's placement before
    /// committing the exchange.
    fn swap_preview(&self) -> PieceKind;
    fn swap(&mut self, current: PieceKind) -> PieceKind;
}

// Shared-handle impls: terminal widgets keep a handle to the same scoreboard
// or queue the state machine drives. Single-threaded, so Rc<RefCell<_>> is
// enough.

impl<S: Scoreboard> Scoreboard for Rc<RefCell<S>> {
    fn record_lines_cleared(&mut self, count: u32) {
        self.borrow_mut().record_lines_cleared(count);
    }

    fn drop_interval_ms(&self) -> u32 {
        self.borrow().drop_interval_ms()
    }
}

impl<Q: PieceSupplier> PieceSupplier for Rc<RefCell<Q>> {
    fn next_piece(&mut self) -> PieceKind {
        self.borrow_mut().next_piece()
    }

    fn can_swap(&self) -> bool {
        self.borrow().can_swap()
    }

    fn swap_preview(&self) -> PieceKind {
        self.borrow().swap_preview()
    }

    fn swap(&mut self, current: PieceKind) -> PieceKind {
        self.borrow_mut().swap(current)
    }
}

/// View that ignores every notification. Useful for headless simulation and
/// tests that only care about state transitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl BoardView for NullView {
    fn draw_board(&mut self, _cells: &[Cell]) {}
    fn draw_piece(&mut self, _kind: PieceKind, _cells: &[i16]) {}
    fn drop_target(&mut self, _cells: &[i16]) {}
    fn do_render(&mut self) {}
    fn show_game_over_screen(&mut self) {}
}
