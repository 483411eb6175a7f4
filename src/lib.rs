//! Raster Tetris: a falling-block rules engine on a flat, sentinel-bordered
//! raster, with a crossterm terminal front end.
//!
//! The `core` module is the game: grid, falling piece, gravity, line clears.
//! `term` and `input` are glue that drive it from a real terminal.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
