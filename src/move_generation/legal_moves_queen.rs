use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::{bishop_attacks, bishop_targets};
use crate::move_generation::legal_moves_rook::{rook_attacks, rook_targets};
use crate::move_generation::legal_move_shared::is_empty_or_enemy;

#[inline]
pub fn queen_attacks(board: &Board, from: Square, target: Square) -> bool {
    rook_attacks(board, from, target) || bishop_attacks(board, from, target)
}

pub fn is_queen_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    queen_attacks(&game_state.board, from, to) && is_empty_or_enemy(&game_state.board, to, mover)
}

pub fn queen_targets(board: &Board, from: Square, out: &mut Vec<Square>) {
    rook_targets(board, from, out);
    bishop_targets(board, from, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_combines_rook_and_bishop_lines() {
        let game = GameState::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").expect("valid FEN");
        let from = Square::at(4, 3);
        assert!(is_queen_move_raw(&game, from, Square::at(0, 3), Color::White));
        assert!(is_queen_move_raw(&game, from, Square::at(1, 6), Color::White));
        assert!(is_queen_move_raw(&game, from, Square::at(4, 7), Color::White));
        assert!(!is_queen_move_raw(&game, from, Square::at(2, 4), Color::White));

        let mut out = Vec::new();
        queen_targets(&game.board, from, &mut out);
        assert_eq!(out.len(), 27);
    }
}
