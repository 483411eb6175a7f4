//! Core module - pure game rules with no I/O dependencies
//!
//! Everything here operates on linear raster indices and collaborator
//! traits; the terminal never leaks in.

pub mod collab;
pub mod game;
pub mod grid;
pub mod queue;
pub mod raster;
pub mod scoring;

pub use collab::{BoardView, NullView, PieceSupplier, Scoreboard};
pub use game::{DropTimer, FallingPiece, GameState};
pub use grid::Grid;
pub use queue::{PieceQueue, SimpleRng};
pub use raster::{base_offsets, piece_cells, rotate_offset, wrap_col};
pub use scoring::Scoring;
