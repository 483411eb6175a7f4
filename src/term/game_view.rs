//! TermView: renders board-state notifications into a terminal frame.
//!
//! Implements the `BoardView` contract by accumulating one frame across the
//! `draw_board` / `draw_piece` / `drop_target` calls and flushing it on
//! `do_render`. The score panel and next/swap previews read from shared
//! handles to the same collaborators the state machine drives.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::collab::{BoardView, Scoreboard};
use crate::core::queue::PieceQueue;
use crate::core::raster::{base_offsets, wrap_col};
use crate::core::scoring::Scoring;
use crate::term::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::term::renderer::TerminalRenderer;
use crate::types::{Cell, PieceKind, GRID_WIDTH, PLAY_COLS, PLAY_END_ROW, PLAY_START_ROW};

/// Terminal columns per board cell (compensates glyph aspect ratio).
const CELL_W: u16 = 2;
/// Visible board rows.
const VISIBLE_ROWS: u16 = (PLAY_END_ROW - PLAY_START_ROW + 1) as u16;

pub struct TermView {
    term: TerminalRenderer,
    fb: FrameBuffer,
    scoring: Rc<RefCell<Scoring>>,
    queue: Rc<RefCell<PieceQueue>>,
    piece_cells: Vec<i16>,
    game_over: bool,
}

impl TermView {
    pub fn new(
        term: TerminalRenderer,
        scoring: Rc<RefCell<Scoring>>,
        queue: Rc<RefCell<PieceQueue>>,
    ) -> Self {
        Self {
            term,
            fb: FrameBuffer::new(0, 0),
            scoring,
            queue,
            piece_cells: Vec::with_capacity(4),
            game_over: false,
        }
    }

    pub fn enter(&mut self) -> anyhow::Result<()> {
        self.term.enter()
    }

    pub fn exit(&mut self) -> anyhow::Result<()> {
        self.term.exit()
    }

    fn frame_origin(&self) -> (u16, u16) {
        let frame_w = PLAY_COLS as u16 * CELL_W + 2;
        let frame_h = VISIBLE_ROWS + 2;
        let x = self.fb.width().saturating_sub(frame_w + 18) / 2;
        let y = self.fb.height().saturating_sub(frame_h) / 2;
        (x, y)
    }

    /// Screen rectangle of one visible board cell, or None for hidden rows.
    fn cell_origin(&self, idx: i16) -> Option<(u16, u16)> {
        let row = idx / GRID_WIDTH;
        let col = idx.rem_euclid(GRID_WIDTH);
        if row < PLAY_START_ROW || row > PLAY_END_ROW || !(1..=PLAY_COLS).contains(&col) {
            return None;
        }
        let (ox, oy) = self.frame_origin();
        let x = ox + 1 + (col as u16 - 1) * CELL_W;
        let y = oy + 1 + (row - PLAY_START_ROW) as u16;
        Some((x, y))
    }

    fn draw_frame_border(&mut self) {
        let (ox, oy) = self.frame_origin();
        let w = PLAY_COLS as u16 * CELL_W + 2;
        let h = VISIBLE_ROWS + 2;
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };

        self.fb.put_char(ox, oy, '┌', style);
        self.fb.put_char(ox + w - 1, oy, '┐', style);
        self.fb.put_char(ox, oy + h - 1, '└', style);
        self.fb.put_char(ox + w - 1, oy + h - 1, '┘', style);
        for dx in 1..w - 1 {
            self.fb.put_char(ox + dx, oy, '─', style);
            self.fb.put_char(ox + dx, oy + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            self.fb.put_char(ox, oy + dy, '│', style);
            self.fb.put_char(ox + w - 1, oy + dy, '│', style);
        }
    }

    fn paint_cell(&mut self, idx: i16, ch: char, style: CellStyle) {
        if let Some((x, y)) = self.cell_origin(idx) {
            self.fb.fill_rect(x, y, CELL_W, 1, ch, style);
        }
    }

    fn draw_side_panel(&mut self) {
        let (ox, oy) = self.frame_origin();
        let panel_x = ox + PLAY_COLS as u16 * CELL_W + 4;
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();

        let (score, lines, level) = {
            let s = self.scoring.borrow();
            (s.score(), s.lines(), s.level())
        };
        let (next, swap) = {
            let q = self.queue.borrow();
            (q.peek_next(), q.peek_swap())
        };

        let mut y = oy;
        self.fb.put_str(panel_x, y, "SCORE", label);
        self.fb.put_str(panel_x + 7, y, &score.to_string(), value);
        y += 1;
        self.fb.put_str(panel_x, y, "LINES", label);
        self.fb.put_str(panel_x + 7, y, &lines.to_string(), value);
        y += 1;
        self.fb.put_str(panel_x, y, "LEVEL", label);
        self.fb.put_str(panel_x + 7, y, &level.to_string(), value);
        y += 2;

        self.fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(panel_x, y + 1, Some(next));
        y += 6;
        self.fb.put_str(panel_x, y, "SWAP", label);
        self.draw_preview(panel_x, y + 1, swap);
        y += 6;

        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        self.fb.put_str(panel_x, y, "arrows move/rotate", dim);
        self.fb.put_str(panel_x, y + 1, "space drop  c swap", dim);
        self.fb.put_str(panel_x, y + 2, "q quit", dim);
    }

    /// 4x4 mini-grid preview of a piece at rotation 0.
    fn draw_preview(&mut self, x: u16, y: u16, kind: Option<PieceKind>) {
        let bg = CellStyle {
            fg: Rgb::new(70, 70, 80),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: true,
        };
        self.fb.fill_rect(x, y, 4 * CELL_W, 4, ' ', bg);
        let Some(kind) = kind else {
            return;
        };
        let style = CellStyle {
            fg: piece_color(kind),
            bg: Rgb::new(20, 20, 28),
            bold: true,
            dim: false,
        };
        for n in base_offsets(kind) {
            let col = wrap_col(n);
            let row = (n - col) / GRID_WIDTH;
            let px = x + ((col + 1) as u16) * CELL_W;
            let py = y + (row + 1) as u16;
            self.fb.fill_rect(px, py, CELL_W, 1, '█', style);
        }
    }

    fn draw_game_over_overlay(&mut self) {
        let (ox, oy) = self.frame_origin();
        let frame_w = PLAY_COLS as u16 * CELL_W + 2;
        let text = "GAME OVER";
        let x = ox + (frame_w.saturating_sub(text.len() as u16)) / 2;
        let y = oy + 1 + VISIBLE_ROWS / 2;
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 20, 20),
            bold: true,
            dim: false,
        };
        self.fb.put_str(x, y, text, style);
        self.fb.put_str(
            x.saturating_sub(1),
            y + 1,
            "press q to quit",
            CellStyle {
                dim: true,
                ..CellStyle::default()
            },
        );
    }
}

impl BoardView for TermView {
    fn draw_board(&mut self, cells: &[Cell]) {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.fb.resize(w, h);
        self.fb.clear(Glyph::default());
        self.piece_cells.clear();

        self.draw_frame_border();

        let empty = CellStyle {
            fg: Rgb::new(80, 80, 95),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: true,
        };
        for (i, cell) in cells.iter().enumerate() {
            let idx = i as i16;
            match cell.kind() {
                Some(kind) => self.paint_cell(idx, '█', occupied_style(kind)),
                None => {
                    if matches!(cell, Cell::Empty) {
                        self.paint_cell(idx, '·', empty);
                    }
                }
            }
        }
    }

    fn draw_piece(&mut self, kind: PieceKind, cells: &[i16]) {
        for &idx in cells {
            self.paint_cell(idx, '█', occupied_style(kind));
        }
        self.piece_cells.clear();
        self.piece_cells.extend_from_slice(cells);
    }

    fn drop_target(&mut self, cells: &[i16]) {
        let ghost = CellStyle {
            fg: Rgb::new(140, 140, 150),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: true,
        };
        for &idx in cells {
            // The resting piece coincides with its own target; keep the
            // solid glyphs on top.
            if !self.piece_cells.contains(&idx) {
                self.paint_cell(idx, '░', ghost);
            }
        }
    }

    fn do_render(&mut self) {
        self.draw_side_panel();
        if self.game_over {
            self.draw_game_over_overlay();
        }
        // Rendering failure is not recoverable mid-frame; drop the frame and
        // let the next one retry.
        let _ = self.term.draw(&self.fb);
    }

    fn show_game_over_screen(&mut self) {
        self.game_over = true;
        self.draw_game_over_overlay();
        let _ = self.term.draw(&self.fb);
    }
}

fn occupied_style(kind: PieceKind) -> CellStyle {
    CellStyle {
        fg: piece_color(kind),
        bg: Rgb::new(20, 20, 28),
        bold: true,
        dim: false,
    }
}

/// Fixed display color per shape.
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}
