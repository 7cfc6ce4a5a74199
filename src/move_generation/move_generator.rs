use crate::game_state::chess_types::*;

/// Source of fully legal moves for the side to move.
///
/// Search and the engines are generic over this so the evaluation and
/// ordering code never depends on how moves are produced.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move>;
}
