//! Raster math - piece offsets and rotation on linear indices
//!
//! Positions are single integers encoding `row * 12 + col`. A piece is four
//! offsets relative to an anchor index; rotation transforms the offsets, never
//! the anchor. The column-wrap helper exists because an offset like `DOWN+LEFT`
//! is `11`, which naively reads as "row 0, column 11" instead of
//! "row 1, column -1".

use crate::types::{PieceKind, DOWN, GRID_WIDTH, LEFT, RIGHT, UP};

/// Offsets of a piece's four cells relative to its anchor, at rotation 0.
pub fn base_offsets(kind: PieceKind) -> [i16; 4] {
    match kind {
        PieceKind::I => [LEFT, 0, RIGHT, 2 * RIGHT],
        PieceKind::O => [0, RIGHT, DOWN, DOWN + RIGHT],
        PieceKind::T => [LEFT, 0, RIGHT, DOWN],
        PieceKind::J => [UP, 0, DOWN, DOWN + LEFT],
        PieceKind::L => [UP, 0, DOWN, DOWN + RIGHT],
        PieceKind::S => [LEFT + DOWN, DOWN, 0, RIGHT],
        PieceKind::Z => [RIGHT + DOWN, DOWN, 0, LEFT],
    }
}

/// Normalize a linear offset's column component into `[-6, 6]`.
///
/// Offsets that cross a row boundary alias their column under plain modulo
/// (e.g. `DOWN + LEFT = 11` has column -1, not 11); values above 6 wrap down
/// by a row, values below -6 wrap up.
pub fn wrap_col(n: i16) -> i16 {
    let mut col = n.rem_euclid(GRID_WIDTH);
    if col > 6 {
        col -= GRID_WIDTH;
    }
    col
}

/// Rotate a linear offset by `rots` quarter turns.
///
/// Decomposes the offset into (row, col), applies the 90-degree rotation
/// matrix, and re-encodes. The decomposition is exact: `n == row * 12 + col`
/// with `col` in `[-6, 6]`.
pub fn rotate_offset(n: i16, rots: i32) -> i16 {
    let col = wrap_col(n);
    let row = (n - col) / GRID_WIDTH;
    match rots.rem_euclid(4) {
        0 => n,
        1 => row + -col * GRID_WIDTH,
        2 => -col + -row * GRID_WIDTH,
        3 => -row + col * GRID_WIDTH,
        _ => unreachable!("rem_euclid(4) is 0..=3"),
    }
}

/// Absolute cell indices of a piece at `anchor` with `rots` quarter turns.
pub fn piece_cells(kind: PieceKind, anchor: i16, rots: i32) -> [i16; 4] {
    base_offsets(kind).map(|n| anchor + rotate_offset(n, rots))
}

/// Row of a linear index (truncating, so negative indices land in row 0 or
/// above and still compare below the visible range).
#[inline]
pub fn row_of(idx: i16) -> i16 {
    idx / GRID_WIDTH
}

/// Column of a linear index. Only meaningful for in-grid indices.
#[inline]
pub fn col_of(idx: i16) -> i16 {
    idx.rem_euclid(GRID_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_col_handles_row_crossing_offsets() {
        assert_eq!(wrap_col(0), 0);
        assert_eq!(wrap_col(RIGHT), 1);
        assert_eq!(wrap_col(LEFT), -1);
        // DOWN + LEFT = 11 is column -1 of the next row.
        assert_eq!(wrap_col(DOWN + LEFT), -1);
        // UP + RIGHT = -11 is column 1 of the previous row.
        assert_eq!(wrap_col(UP + RIGHT), 1);
        assert_eq!(wrap_col(DOWN), 0);
        assert_eq!(wrap_col(2 * RIGHT), 2);
    }

    #[test]
    fn rotate_zero_is_identity() {
        for kind in PieceKind::ALL {
            for n in base_offsets(kind) {
                assert_eq!(rotate_offset(n, 0), n);
            }
        }
    }

    #[test]
    fn rotate_single_step() {
        // (row 0, col 1) -> (row 1, col 0) under one clockwise quarter turn
        // of the (row, col) -> (col, -row) encoding.
        assert_eq!(rotate_offset(RIGHT, 1), -DOWN);
        assert_eq!(rotate_offset(DOWN, 1), RIGHT);
        assert_eq!(rotate_offset(DOWN + LEFT, 1), RIGHT + DOWN);
    }

    #[test]
    fn rotation_is_a_cyclic_group_of_order_four() {
        for kind in PieceKind::ALL {
            for n in base_offsets(kind) {
                assert_eq!(rotate_offset(n, 4), n, "{kind:?} offset {n}");
                // Stepwise application agrees with a single combined rotation.
                let stepped = rotate_offset(rotate_offset(n, 1), 1);
                assert_eq!(stepped, rotate_offset(n, 2), "{kind:?} offset {n}");
            }
        }
    }

    #[test]
    fn rotate_two_is_point_reflection() {
        for kind in PieceKind::ALL {
            for n in base_offsets(kind) {
                assert_eq!(rotate_offset(n, 2), -n);
            }
        }
    }

    #[test]
    fn negative_rotation_counts_normalize() {
        for n in base_offsets(PieceKind::T) {
            assert_eq!(rotate_offset(n, -1), rotate_offset(n, 3));
            assert_eq!(rotate_offset(n, -3), rotate_offset(n, 1));
            assert_eq!(rotate_offset(n, 7), rotate_offset(n, 3));
        }
    }

    #[test]
    fn piece_cells_are_anchor_relative() {
        let cells = piece_cells(PieceKind::T, 17, 0);
        assert_eq!(cells, [16, 17, 18, 29]);
    }

    #[test]
    fn every_kind_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rots in 0..4 {
                let cells = piece_cells(kind, 17, rots);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(cells[i], cells[j], "{kind:?} rots {rots}");
                    }
                }
            }
        }
    }

    #[test]
    fn row_of_truncates_toward_zero() {
        assert_eq!(row_of(0), 0);
        assert_eq!(row_of(11), 0);
        assert_eq!(row_of(12), 1);
        // Negative indices never reach the visible range (row >= 2).
        assert!(row_of(-5) < 2);
    }
}
