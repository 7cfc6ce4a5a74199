//! Conversions between `(row, col)` squares and algebraic coordinates.
//!
//! Column 0 is file `a`; row 0 is rank 8 and row 7 is rank 1.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::needs_promotion;

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(format!("invalid square: {square}")));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation(format!("invalid file: {}", file as char)));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!("invalid rank: {}", rank as char)));
    }

    Ok(Square::at(b'8' - rank, file - b'a'))
}

/// Convert a square to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.col);
    let rank_char = char::from(b'8' - square.row);
    format!("{file_char}{rank_char}")
}

/// Long algebraic form of a move, e.g. `e2e4` or `a7a8q`.
pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = mv.promotion {
        out.push(kind.to_char());
    }
    out
}

/// Parses `e2e4` / `a7a8q` into a move for `game_state`.
///
/// The captured piece is filled from the board so the result can be fed to
/// ordering or history code directly; legality is not checked here.
pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid long algebraic move: {long_algebraic}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => {
            let kind = PieceKind::from_char(ch).ok_or_else(|| {
                ChessError::InvalidNotation(format!("invalid promotion piece: {ch}"))
            })?;
            if !kind.is_promotion_target() {
                return Err(ChessError::InvalidPromotionPiece(kind));
            }
            Some(kind)
        }
    };

    if promotion.is_some() && !needs_promotion(game_state, from, to) {
        return Err(ChessError::InvalidNotation(format!(
            "{long_algebraic} is not a promotion move"
        )));
    }

    Ok(Move {
        from,
        to,
        promotion,
        captured: game_state.piece_at(to),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), Square::at(7, 0));
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), Square::at(0, 7));
        assert_eq!(algebraic_to_square("e2").expect("e2 should parse"), Square::at(6, 4));
        assert_eq!(square_to_algebraic(Square::at(7, 0)), "a1");
        assert_eq!(square_to_algebraic(Square::at(0, 7)), "h8");
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
    }

    #[test]
    fn parses_long_algebraic_moves() {
        let game = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &game).expect("e2e4 should parse");
        assert_eq!(mv.from, Square::at(6, 4));
        assert_eq!(mv.to, Square::at(4, 4));
        assert_eq!(mv.promotion, None);
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");

        assert!(long_algebraic_to_move("e2e4q", &game).is_err());
        assert!(long_algebraic_to_move("e2", &game).is_err());
    }

    #[test]
    fn parses_promotion_suffix() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let mv = long_algebraic_to_move("a7a8n", &game).expect("promotion should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(
            long_algebraic_to_move("a7a8k", &game),
            Err(ChessError::InvalidPromotionPiece(PieceKind::King))
        );
    }
}
