//! Grid module - the sentinel-bordered placed-cell raster
//!
//! Flat `[Cell; 276]` storage, linear-indexed `row * 12 + col`. Columns 0 and
//! 11 and the bottom row hold permanent `Boundary` cells so the collision
//! predicate needs no bounds arithmetic: walls and floor block exactly like
//! locked pieces. Reads outside the buffer also report `Boundary`, which is
//! what keeps the hidden spawn rows closed off from above.

use crate::types::{
    Cell, PieceKind, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH, PLAY_END_COL, PLAY_END_ROW,
    PLAY_START_COL, PLAY_START_ROW,
};

/// The placed-cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create an empty grid with its sentinel border in place.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; GRID_CELLS];
        for row in 0..GRID_HEIGHT {
            cells[(row * GRID_WIDTH) as usize] = Cell::Boundary;
            cells[(row * GRID_WIDTH + GRID_WIDTH - 1) as usize] = Cell::Boundary;
        }
        for col in 0..GRID_WIDTH {
            cells[((GRID_HEIGHT - 1) * GRID_WIDTH + col) as usize] = Cell::Boundary;
        }
        Self { cells }
    }

    /// Read the cell at a linear index. Out-of-range indices read as
    /// `Boundary` so they block like the border does.
    pub fn cell(&self, idx: i16) -> Cell {
        if idx < 0 || idx as usize >= GRID_CELLS {
            return Cell::Boundary;
        }
        self.cells[idx as usize]
    }

    /// The single collision predicate: a placement is valid iff every cell it
    /// covers is `Empty`.
    pub fn all_empty(&self, indices: &[i16]) -> bool {
        indices.iter().all(|&idx| self.cell(idx).is_empty())
    }

    /// Write a playable cell. The sentinel border is never writable.
    pub fn set(&mut self, idx: i16, cell: Cell) {
        debug_assert!(
            Self::is_playable(idx),
            "set outside playable area: {idx}"
        );
        if idx >= 0 && (idx as usize) < GRID_CELLS {
            self.cells[idx as usize] = cell;
        }
    }

    /// Whether an index lies in the writable (non-sentinel) area, hidden
    /// spawn rows included.
    pub fn is_playable(idx: i16) -> bool {
        if idx < 0 || idx as usize >= GRID_CELLS {
            return false;
        }
        let col = idx.rem_euclid(GRID_WIDTH);
        let row = idx / GRID_WIDTH;
        (PLAY_START_COL..=PLAY_END_COL).contains(&col) && row < GRID_HEIGHT - 1
    }

    /// Lock a piece's cells into the grid. This is the only transition from
    /// `Empty` to `Occupied`.
    pub fn lock(&mut self, indices: &[i16], kind: PieceKind) {
        for &idx in indices {
            self.set(idx, Cell::Occupied(kind));
        }
    }

    /// Whether every playable column of `row` is occupied.
    pub fn is_row_full(&self, row: i16) -> bool {
        (PLAY_START_COL..=PLAY_END_COL)
            .all(|col| !self.cell(row * GRID_WIDTH + col).is_empty())
    }

    /// Clear all full visible rows and return how many were cleared.
    ///
    /// The scan runs bottom-up. After a clear, every row above slides down by
    /// one, so the cursor stays on the same row index and re-tests it: the
    /// row that just slid in may itself be full.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut row = PLAY_END_ROW;
        let mut cleared = 0u32;
        while row >= PLAY_START_ROW {
            if !self.is_row_full(row) {
                row -= 1;
                continue;
            }
            cleared += 1;
            self.shift_down_into(row);
        }
        cleared
    }

    /// Slide every playable row above `row` down by one, overwriting `row`.
    /// The topmost row inherits the (empty) hidden row above it.
    fn shift_down_into(&mut self, row: i16) {
        for r in (1..=row).rev() {
            for col in PLAY_START_COL..=PLAY_END_COL {
                let src = (r - 1) * GRID_WIDTH + col;
                let dst = r * GRID_WIDTH + col;
                self.cells[dst as usize] = self.cells[src as usize];
            }
        }
    }

    /// Full cell buffer, for rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DOWN, PLAY_COLS};

    fn fill_row(grid: &mut Grid, row: i16, kind: PieceKind) {
        for col in PLAY_START_COL..=PLAY_END_COL {
            grid.set(row * GRID_WIDTH + col, Cell::Occupied(kind));
        }
    }

    fn count_occupied(grid: &Grid) -> usize {
        grid.cells()
            .iter()
            .filter(|c| matches!(c, Cell::Occupied(_)))
            .count()
    }

    #[test]
    fn new_grid_has_sentinel_border() {
        let grid = Grid::new();
        for row in 0..GRID_HEIGHT {
            assert_eq!(grid.cell(row * GRID_WIDTH), Cell::Boundary);
            assert_eq!(grid.cell(row * GRID_WIDTH + 11), Cell::Boundary);
        }
        for col in 0..GRID_WIDTH {
            assert_eq!(grid.cell(22 * GRID_WIDTH + col), Cell::Boundary);
        }
        // Hidden rows and visible rows start empty in the playable columns.
        for row in 0..=PLAY_END_ROW {
            for col in PLAY_START_COL..=PLAY_END_COL {
                assert_eq!(grid.cell(row * GRID_WIDTH + col), Cell::Empty);
            }
        }
    }

    #[test]
    fn out_of_range_reads_block() {
        let grid = Grid::new();
        assert_eq!(grid.cell(-1), Cell::Boundary);
        assert_eq!(grid.cell(-13), Cell::Boundary);
        assert_eq!(grid.cell(GRID_CELLS as i16), Cell::Boundary);
    }

    #[test]
    fn all_empty_is_the_collision_predicate() {
        let mut grid = Grid::new();
        assert!(grid.all_empty(&[13, 14, 25, 26]));
        grid.set(25, Cell::Occupied(PieceKind::S));
        assert!(!grid.all_empty(&[13, 14, 25, 26]));
        // Border and occupied cells block identically.
        assert!(!grid.all_empty(&[12]));
    }

    #[test]
    fn lock_writes_piece_kind() {
        let mut grid = Grid::new();
        let indices = [16 + 19 * DOWN, 17 + 19 * DOWN, 18 + 19 * DOWN, 29 + 19 * DOWN];
        grid.lock(&indices, PieceKind::T);
        for idx in indices {
            assert_eq!(grid.cell(idx), Cell::Occupied(PieceKind::T));
        }
    }

    #[test]
    fn full_bottom_row_clears_to_empty_board() {
        let mut grid = Grid::new();
        fill_row(&mut grid, PLAY_END_ROW, PieceKind::I);
        assert!(grid.is_row_full(PLAY_END_ROW));

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(count_occupied(&grid), 0);
    }

    #[test]
    fn partially_filled_row_is_not_full() {
        let mut grid = Grid::new();
        fill_row(&mut grid, PLAY_END_ROW, PieceKind::Z);
        grid.set(PLAY_END_ROW * GRID_WIDTH + 5, Cell::Empty);
        assert!(!grid.is_row_full(PLAY_END_ROW));
        assert_eq!(grid.clear_full_rows(), 0);
    }

    #[test]
    fn adjacent_full_rows_clear_in_one_pass() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 20, PieceKind::J);
        fill_row(&mut grid, 21, PieceKind::L);
        // A marker row above the pair.
        grid.set(19 * GRID_WIDTH + 3, Cell::Occupied(PieceKind::T));

        assert_eq!(grid.clear_full_rows(), 2);
        // Row 19's content slid down two rows to the bottom.
        assert_eq!(
            grid.cell(21 * GRID_WIDTH + 3),
            Cell::Occupied(PieceKind::T)
        );
        assert_eq!(count_occupied(&grid), 1);
    }

    #[test]
    fn separated_full_rows_clear_in_one_pass() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 21, PieceKind::S);
        fill_row(&mut grid, 19, PieceKind::Z);
        grid.set(20 * GRID_WIDTH + 7, Cell::Occupied(PieceKind::O));

        assert_eq!(grid.clear_full_rows(), 2);
        // The lone cell from row 20 ends on the bottom row.
        assert_eq!(
            grid.cell(21 * GRID_WIDTH + 7),
            Cell::Occupied(PieceKind::O)
        );
        assert_eq!(count_occupied(&grid), 1);
    }

    #[test]
    fn four_full_rows_clear_together() {
        let mut grid = Grid::new();
        for row in 18..=21 {
            fill_row(&mut grid, row, PieceKind::I);
        }
        assert_eq!(grid.clear_full_rows(), 4);
        assert_eq!(count_occupied(&grid), 0);
    }

    #[test]
    fn clearing_preserves_the_border() {
        let mut grid = Grid::new();
        for row in 15..=21 {
            fill_row(&mut grid, row, PieceKind::T);
        }
        grid.clear_full_rows();
        assert_eq!(grid, Grid::new());
        assert_eq!(
            grid.cells()
                .iter()
                .filter(|c| matches!(c, Cell::Boundary))
                .count(),
            (GRID_HEIGHT as usize - 1) * 2 + GRID_WIDTH as usize
        );
    }

    #[test]
    fn playable_area_has_200_visible_cells() {
        let visible = (PLAY_END_ROW - PLAY_START_ROW + 1) * PLAY_COLS;
        assert_eq!(visible, 200);
    }
}
