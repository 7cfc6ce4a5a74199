use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    col_delta, is_empty_or_enemy, offset_targets, row_delta, KNIGHT_OFFSETS,
};

/// L-shaped jump; nothing in between is inspected.
#[inline]
pub fn knight_attacks(from: Square, target: Square) -> bool {
    matches!(
        (row_delta(from, target).abs(), col_delta(from, target).abs()),
        (1, 2) | (2, 1)
    )
}

pub fn is_knight_move_raw(game_state: &GameState, from: Square, to: Square, mover: Color) -> bool {
    knight_attacks(from, to) && is_empty_or_enemy(&game_state.board, to, mover)
}

pub fn knight_targets(from: Square, out: &mut Vec<Square>) {
    offset_targets(from, &KNIGHT_OFFSETS, out);
}
