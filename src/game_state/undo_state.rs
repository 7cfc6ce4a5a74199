use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Holds the whole prior position, so restoring is exact for every move
/// type (castling, en passant and promotion included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prior: GameState,
}
