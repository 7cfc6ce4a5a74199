//! Pawn movement rules.
//!
//! Pushes go toward `Color::pawn_direction`; the double push is only allowed
//! from the start row with both squares empty. Diagonal steps capture an
//! enemy piece or land on the current en-passant target.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{col_delta, row_delta};

pub fn is_pawn_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    let board = &game_state.board;
    let dir = mover.pawn_direction();
    let d_row = row_delta(from, to);
    let d_col = col_delta(from, to);

    if d_col == 0 {
        if d_row == dir {
            return board.is_empty(to);
        }
        if d_row == 2 * dir && from.row == mover.pawn_start_row() {
            let Some(mid) = from.offset(dir, 0) else {
                return false;
            };
            return board.is_empty(mid) && board.is_empty(to);
        }
        return false;
    }

    if d_col.abs() == 1 && d_row == dir {
        return match board.get(to) {
            Some(target) => target.color != mover,
            None => is_en_passant_capture(game_state, from, to, mover),
        };
    }

    false
}

/// Diagonal pawn move onto the empty en-passant target, with an enemy pawn
/// standing beside the mover to be taken.
#[inline]
pub fn is_en_passant_capture(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    game_state.en_passant_square == Some(to)
        && game_state.board.is_empty(to)
        && row_delta(from, to) == mover.pawn_direction()
        && col_delta(from, to).abs() == 1
        && game_state.board.get(en_passant_victim_square(from, to))
            == Some(Piece::new(mover.opposite(), PieceKind::Pawn))
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(from: Square, to: Square) -> Square {
    Square::at(from.row, to.col)
}

/// Pawns attack both forward diagonals, occupied or not.
#[inline]
pub fn pawn_attacks(from: Square, target: Square, color: Color) -> bool {
    row_delta(from, target) == color.pawn_direction() && col_delta(from, target).abs() == 1
}

pub fn pawn_targets(from: Square, mover: Color, out: &mut Vec<Square>) {
    let dir = mover.pawn_direction();
    for (d_row, d_col) in [(dir, 0), (2 * dir, 0), (dir, -1), (dir, 1)] {
        if let Some(to) = from.offset(d_row, d_col) {
            out.push(to);
        }
    }
}
