//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by game logic, parsing
//! utilities, engines and the session layer.
//!
//! - Input problems (`OutOfBounds`, `IllegalMove`, `AmbiguousPromotion`,
//!   `PromotionPending`, parsing variants) are recoverable: the state they
//!   were checked against is left unchanged and the caller may retry.
//! - `MissingKing` means the position itself is corrupt. It is never expected
//!   in normal play and callers should stop rather than patch the board.

use thiserror::Error;

use crate::game_state::chess_types::{Color, GameStatus, PieceKind, Square};

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Caller-supplied coordinates outside `0..=7`.
    #[error("coordinates ({row},{col}) are outside the board")]
    OutOfBounds { row: i32, col: i32 },

    /// The move failed a shape, path, occupancy or king-safety rule.
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: &'static str,
    },

    /// A promotion is pending on the given square and no piece kind was supplied.
    #[error("promotion pending on {0} requires a piece kind")]
    AmbiguousPromotion(Square),

    /// A side has no king on the board.
    #[error("{0} has no king on the board")]
    MissingKing(Color),

    /// A move was submitted while a promotion is still unresolved.
    #[error("promotion on {0} must be resolved before the next move")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    #[error("the game is already over ({0})")]
    GameOver(GameStatus),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("invalid value {value:?} for option {name:?}")]
    InvalidOption { name: String, value: String },
}

impl ChessError {
    #[inline]
    pub(crate) fn illegal(from: Square, to: Square, reason: &'static str) -> Self {
        ChessError::IllegalMove { from, to, reason }
    }
}
