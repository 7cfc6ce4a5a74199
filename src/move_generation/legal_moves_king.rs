//! King movement rules, castling included.

use crate::game_state::chess_rules::castle_side_for_king_move;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{
    col_delta, is_empty_or_enemy, offset_targets, row_delta, KING_OFFSETS,
};

/// One step in any direction.
#[inline]
pub fn king_attacks(from: Square, target: Square) -> bool {
    let d_row = row_delta(from, target).abs();
    let d_col = col_delta(from, target).abs();
    d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
}

pub fn is_king_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    if king_attacks(from, to) {
        return is_empty_or_enemy(&game_state.board, to, mover);
    }
    is_castling_move_raw(game_state, from, to, mover)
}

/// Two-square castling move: right held, rook on its corner, the squares
/// between king and rook empty, and no square the king stands on, crosses or
/// lands on attacked by the opponent.
pub fn is_castling_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    let Some(side) = castle_side_for_king_move(mover, from, to) else {
        return false;
    };
    if !game_state.has_castling_right(side.right) {
        return false;
    }

    let board = &game_state.board;
    if board.get(side.rook_from()) != Some(Piece::new(mover, PieceKind::Rook)) {
        return false;
    }
    if side
        .between_cols()
        .any(|col| !board.is_empty(Square::at(side.row(), col)))
    {
        return false;
    }

    let enemy = mover.opposite();
    !side
        .king_path_cols()
        .iter()
        .any(|&col| is_square_attacked(game_state, Square::at(side.row(), col), enemy))
}

pub fn king_targets(from: Square, out: &mut Vec<Square>) {
    offset_targets(from, &KING_OFFSETS, out);
    for d_col in [-2, 2] {
        if let Some(to) = from.offset(0, d_col) {
            out.push(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    #[test]
    fn castling_requires_empty_path() {
        let game = GameState::new_game();
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 6), Color::White));

        let open = GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
            .expect("valid FEN");
        assert!(is_king_move_raw(&open, sq(7, 4), sq(7, 6), Color::White));
        assert!(is_king_move_raw(&open, sq(7, 4), sq(7, 2), Color::White));
        assert!(is_king_move_raw(&open, sq(0, 4), sq(0, 6), Color::Black));
        assert!(is_king_move_raw(&open, sq(0, 4), sq(0, 2), Color::Black));
    }

    #[test]
    fn castling_needs_the_matching_right() {
        let game = GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Qk - 0 1")
            .expect("valid FEN");
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 6), Color::White));
        assert!(is_king_move_raw(&game, sq(7, 4), sq(7, 2), Color::White));
        assert!(is_king_move_raw(&game, sq(0, 4), sq(0, 6), Color::Black));
        assert!(!is_king_move_raw(&game, sq(0, 4), sq(0, 2), Color::Black));
    }

    #[test]
    fn castling_through_attacked_square_is_rejected() {
        // black rook on f-file guards f1
        let game = GameState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid FEN");
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 6), Color::White));
        assert!(is_king_move_raw(&game, sq(7, 4), sq(7, 2), Color::White));
    }

    #[test]
    fn castling_out_of_check_is_rejected() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid FEN");
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 6), Color::White));
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 2), Color::White));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        // black rook on b-file attacks b1 only; the king never crosses it
        let game = GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("valid FEN");
        assert!(is_king_move_raw(&game, sq(7, 4), sq(7, 2), Color::White));
    }

    #[test]
    fn pawn_guarding_transit_square_blocks_castling() {
        // black pawn on e2 attacks f1
        let game = GameState::from_fen("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1").expect("valid FEN");
        assert!(!is_king_move_raw(&game, sq(7, 4), sq(7, 6), Color::White));
    }
}
