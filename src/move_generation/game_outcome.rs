//! Checkmate / stalemate detection for the side about to move.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    candidate_targets, generate_legal_moves, is_legal_move,
};

/// True as soon as one fully legal move of `side` is found.
pub fn has_legal_move(game_state: &GameState, side: Color) -> bool {
    if game_state.pending_promotion.is_some() {
        return false;
    }
    let mut targets = Vec::with_capacity(32);
    for (from, piece) in game_state.board.pieces_of(side) {
        targets.clear();
        candidate_targets(game_state, from, piece, &mut targets);
        if targets
            .iter()
            .any(|&to| is_legal_move(game_state, from, to, side))
        {
            return true;
        }
    }
    false
}

/// Classifies the position for `side`, which is about to move.
pub fn classify(game_state: &GameState, side: Color) -> ChessResult<GameStatus> {
    game_state.validate_kings()?;
    if let Some(square) = game_state.pending_promotion {
        return Err(ChessError::PromotionPending(square));
    }
    if has_legal_move(game_state, side) {
        return Ok(GameStatus::Ongoing);
    }
    Ok(if is_king_in_check(game_state, side) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    })
}

/// Number of legal replies, for diagnostics.
pub fn legal_move_count(game_state: &GameState, side: Color) -> usize {
    generate_legal_moves(game_state, side).len()
}
