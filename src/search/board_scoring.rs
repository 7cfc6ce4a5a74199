//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! so alternate heuristics can be swapped without touching search code.

use crate::game_state::chess_types::*;
use crate::search::piece_square_tables::piece_square_value;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view: positive favours that side.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

#[inline]
fn signed(piece: Piece, perspective: Color, value: i32) -> i32 {
    if piece.color == perspective {
        value
    } else {
        -value
    }
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        game_state
            .board
            .pieces()
            .map(|(_, piece)| signed(piece, perspective, piece.kind.value()))
            .sum()
    }
}

/// Material plus piece-square bonus; the default evaluation for search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        game_state
            .board
            .pieces()
            .map(|(square, piece)| {
                signed(
                    piece,
                    perspective,
                    piece.kind.value() + piece_square_value(piece, square),
                )
            })
            .sum()
    }
}
