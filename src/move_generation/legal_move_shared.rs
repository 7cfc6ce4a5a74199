//! Geometry helpers shared by the per-piece rule modules.

use crate::game_state::chess_types::*;

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn row_delta(from: Square, to: Square) -> i8 {
    to.row as i8 - from.row as i8
}

#[inline]
pub fn col_delta(from: Square, to: Square) -> i8 {
    to.col as i8 - from.col as i8
}

/// Destination is empty or holds a piece of the other color.
#[inline]
pub fn is_empty_or_enemy(board: &Board, to: Square, mover: Color) -> bool {
    board.color_at(to) != Some(mover)
}

#[inline]
pub fn enemy_piece_on(board: &Board, square: Square, mover: Color) -> Option<Piece> {
    board.get(square).filter(|piece| piece.color != mover)
}

/// True when `from -> to` is a straight line along one of `directions` and
/// every square strictly between them is empty.
pub fn is_clear_line(board: &Board, from: Square, to: Square, directions: &[(i8, i8)]) -> bool {
    let d_row = row_delta(from, to);
    let d_col = col_delta(from, to);
    if d_row == 0 && d_col == 0 {
        return false;
    }
    let step = (d_row.signum(), d_col.signum());
    let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    if !aligned || !directions.contains(&step) {
        return false;
    }

    let mut cursor = from;
    loop {
        let Some(next) = cursor.offset(step.0, step.1) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        cursor = next;
    }
}

/// Squares reachable by sliding along `directions` until blocked, including
/// the first occupied square of each ray.
pub fn ray_targets(board: &Board, from: Square, directions: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            out.push(next);
            if !board.is_empty(next) {
                break;
            }
            cursor = next;
        }
    }
}

/// Squares at the given fixed offsets that exist on the board.
pub fn offset_targets(from: Square, offsets: &[(i8, i8)], out: &mut Vec<Square>) {
    out.extend(
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col)),
    );
}
