//! Move-history notation in the form `P: e2-e4`.
//!
//! The letter is the FEN letter of the moving piece (upper case for White);
//! promotions append `=Q` style suffixes.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// Describes `mv` as played from `before`; `None` if the source is empty.
pub fn move_notation(before: &GameState, mv: &Move) -> Option<String> {
    let piece = before.piece_at(mv.from)?;
    let mut out = format!(
        "{}: {}-{}",
        piece.to_char(),
        square_to_algebraic(mv.from),
        square_to_algebraic(mv.to)
    );
    if let Some(kind) = mv.promotion {
        out.push('=');
        out.push(Piece::new(piece.color, kind).to_char());
    }
    Some(out)
}
