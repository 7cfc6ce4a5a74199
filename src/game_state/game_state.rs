//! Board and game-state representation.
//!
//! `Board` is a plain 8×8 mailbox of optional pieces. `GameState` wraps it
//! with the side to move, castling rights, the en-passant target and the
//! promotion-pending square. Both are `Copy` so search can snapshot and
//! restore a whole position cheaply.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::BACK_RANK;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// 8×8 grid; the square owns whatever piece stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial arrangement.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                board.set(Square::at(color.back_row(), col), Some(Piece::new(color, *kind)));
                board.set(
                    Square::at(color.pawn_start_row(), col),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Removes and returns the piece on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.get(square).map(|piece| piece.color)
    }

    /// Every occupied square with its piece, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, p)| *p == piece).count()
    }
}

/// Full position: board plus the state that is not visible on the squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Square a pawn skipped over on the previous move.
    pub en_passant_square: Option<Square>,
    /// Square of a pawn waiting for its promotion piece.
    pub pending_promotion: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            pending_promotion: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Initial standard chess position, White to move, all rights held.
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            castling_rights: CASTLE_ALL,
            ..Self::default()
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// Verifies the one-king-per-side invariant.
    pub fn validate_kings(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.board.count(Piece::new(color, PieceKind::King));
            if kings != 1 {
                return Err(ChessError::MissingKing(color));
            }
        }
        Ok(())
    }
}
