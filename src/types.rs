//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Raster geometry. The playable field is 10 columns x 20 rows, stored inside
/// a 12x23 flat buffer: one sentinel column on each side, one sentinel row at
/// the bottom, and two hidden spawn rows above the visible top.
pub const GRID_WIDTH: i16 = 12;
pub const GRID_HEIGHT: i16 = 23;
pub const GRID_CELLS: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Playable column range (inclusive).
pub const PLAY_START_COL: i16 = 1;
pub const PLAY_END_COL: i16 = 10;
pub const PLAY_COLS: i16 = 10;

/// Playable row range (inclusive). Rows 0 and 1 are the hidden spawn buffer.
pub const PLAY_START_ROW: i16 = 2;
pub const PLAY_END_ROW: i16 = 21;

/// Linear-index movement deltas.
pub const UP: i16 = -GRID_WIDTH;
pub const DOWN: i16 = GRID_WIDTH;
pub const LEFT: i16 = -1;
pub const RIGHT: i16 = 1;

/// Anchor index for a freshly spawned piece (row 1, column 5).
pub const SPAWN_ANCHOR: i16 = DOWN + 5 * RIGHT;

/// Fixed input-poll cadence for the terminal runner (milliseconds).
pub const TICK_MS: u32 = 16;

/// Classic line-clear scores, indexed by lines cleared in one drop.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Gravity speed curve: base interval minus a per-level step, floored.
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_MS_PER_LEVEL: u32 = 75;
pub const MIN_DROP_MS: u32 = 100;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All seven kinds, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// One cell of the raster.
///
/// `Boundary` is a permanent sentinel: the collision predicate treats it the
/// same as `Occupied`, but line clearing never touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(PieceKind),
    Boundary,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Occupied(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Discrete input commands accepted by the state machine.
///
/// Mapping from physical keys to these commands lives in the `input` module;
/// gating them on the game-over flag is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
    Swap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_constants_are_consistent() {
        assert_eq!(GRID_CELLS, 276);
        assert_eq!(SPAWN_ANCHOR, 17);
        assert_eq!(UP, -DOWN);
        assert_eq!(PLAY_END_COL - PLAY_START_COL + 1, PLAY_COLS);
    }

    #[test]
    fn cell_kind_extraction() {
        assert_eq!(Cell::Empty.kind(), None);
        assert_eq!(Cell::Boundary.kind(), None);
        assert_eq!(Cell::Occupied(PieceKind::T).kind(), Some(PieceKind::T));
        assert!(Cell::Empty.is_empty());
        assert!(!Cell::Boundary.is_empty());
    }
}
