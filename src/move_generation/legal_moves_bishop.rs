use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    is_clear_line, is_empty_or_enemy, ray_targets, DIAGONAL_DIRECTIONS,
};

#[inline]
pub fn bishop_attacks(board: &Board, from: Square, target: Square) -> bool {
    is_clear_line(board, from, target, &DIAGONAL_DIRECTIONS)
}

pub fn is_bishop_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    bishop_attacks(&game_state.board, from, to) && is_empty_or_enemy(&game_state.board, to, mover)
}

pub fn bishop_targets(board: &Board, from: Square, out: &mut Vec<Square>) {
    ray_targets(board, from, &DIAGONAL_DIRECTIONS, out);
}
