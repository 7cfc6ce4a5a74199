//! Rook movement rules: orthogonal rays with an empty path.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    is_clear_line, is_empty_or_enemy, ray_targets, ORTHOGONAL_DIRECTIONS,
};

#[inline]
pub fn rook_attacks(board: &Board, from: Square, target: Square) -> bool {
    is_clear_line(board, from, target, &ORTHOGONAL_DIRECTIONS)
}

pub fn is_rook_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    rook_attacks(&game_state.board, from, to) && is_empty_or_enemy(&game_state.board, to, mover)
}

pub fn rook_targets(board: &Board, from: Square, out: &mut Vec<Square>) {
    ray_targets(board, from, &ORTHOGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_slides_until_blocked() {
        let game = GameState::from_fen("4k3/8/8/8/r7/8/8/R3K3 w - - 0 1").expect("valid FEN");
        let from = Square::at(7, 0);
        assert!(is_rook_move_raw(&game, from, Square::at(5, 0), Color::White));
        assert!(is_rook_move_raw(&game, from, Square::at(4, 0), Color::White));
        assert!(!is_rook_move_raw(&game, from, Square::at(3, 0), Color::White));
        assert!(is_rook_move_raw(&game, from, Square::at(7, 3), Color::White));
        assert!(!is_rook_move_raw(&game, from, Square::at(7, 4), Color::White));
        assert!(!is_rook_move_raw(&game, from, Square::at(6, 1), Color::White));
    }

    #[test]
    fn rook_targets_stop_at_first_piece() {
        let game = GameState::from_fen("4k3/8/8/8/r7/8/8/R3K3 w - - 0 1").expect("valid FEN");
        let mut out = Vec::new();
        rook_targets(&game.board, Square::at(7, 0), &mut out);
        // three squares up to the black rook, four along the rank up to the king
        assert_eq!(out.len(), 7);
    }
}
