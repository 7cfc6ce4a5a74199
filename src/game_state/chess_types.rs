//! Core value types shared by every subsystem.
//!
//! Squares are addressed as `(row, col)` with row 0 being Black's back rank
//! and row 7 White's back rank. Pieces are plain values owned by the board
//! square they stand on.

use std::fmt;

pub use crate::game_state::game_state::{Board, GameState};
pub use crate::game_state::undo_state::UndoState;

use crate::chess_errors::{ChessError, ChessResult};

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind; color is carried separately by [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Lower-case letter used by FEN and long algebraic notation.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A colored piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn to_char(self) -> char {
        let ch = self.kind.to_char();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_char(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, kind })
    }
}

/// Board coordinate, always inside `[0,8)²` once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Checked constructor accepting caller-supplied coordinates.
    pub fn new(row: i32, col: i32) -> ChessResult<Self> {
        Self::try_from_signed(row, col).ok_or(ChessError::OutOfBounds { row, col })
    }

    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    #[inline]
    pub fn try_from_signed(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Square displaced by `(d_row, d_col)`, or `None` off the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_from_signed(
            self.row as i32 + d_row as i32,
            self.col as i32 + d_col as i32,
        )
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A move as produced by the generator or submitted by a caller.
///
/// `captured` is informational: the generator fills it (including the pawn
/// taken en passant) so the search can order captures first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Piece>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            captured: None,
        }
    }

    #[inline]
    pub const fn with_promotion(mut self, promotion: Option<PieceKind>) -> Self {
        self.promotion = promotion;
        self
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Plain coordinate tuple used by transports: `(fromRow, fromCol, toRow, toCol)`.
    #[inline]
    pub fn coords(&self) -> (u8, u8, u8, u8) {
        (self.from.row, self.from.col, self.to.row, self.to.col)
    }
}

/// Castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;

/// Outcome of classifying a position for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new_rejects_out_of_range_coordinates() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(7, 7).is_ok());
        assert!(matches!(
            Square::new(8, 0),
            Err(ChessError::OutOfBounds { row: 8, col: 0 })
        ));
        assert!(matches!(
            Square::new(3, -1),
            Err(ChessError::OutOfBounds { row: 3, col: -1 })
        ));
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let corner = Square::at(0, 7);
        assert_eq!(corner.offset(1, -1), Some(Square::at(1, 6)));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
    }

    #[test]
    fn piece_letters_follow_color_case() {
        let white_knight = Piece::new(Color::White, PieceKind::Knight);
        assert_eq!(white_knight.to_char(), 'N');
        assert_eq!(Piece::from_char('n'), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn pawn_geometry_is_color_relative() {
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::White.pawn_start_row(), 6);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.pawn_direction(), 1);
        assert_eq!(Color::Black.pawn_start_row(), 1);
        assert_eq!(Color::Black.promotion_row(), 7);
    }
}
