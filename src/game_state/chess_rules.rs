//! Canonical chess-rule constants.
//!
//! Starting layout, castling geometry and the rook corners whose rights are
//! tracked. All coordinates use the `(row, col)` convention with White on
//! rows 6 and 7.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank piece order from column 0 to column 7.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_START_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Geometry of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSide {
    pub right: CastlingRights,
    pub color: Color,
    pub rook_from_col: u8,
    pub rook_to_col: u8,
    pub king_to_col: u8,
}

impl CastleSide {
    #[inline]
    pub const fn row(&self) -> u8 {
        self.color.back_row()
    }

    #[inline]
    pub const fn king_from(&self) -> Square {
        Square::at(self.row(), KING_START_COL)
    }

    #[inline]
    pub const fn king_to(&self) -> Square {
        Square::at(self.row(), self.king_to_col)
    }

    #[inline]
    pub const fn rook_from(&self) -> Square {
        Square::at(self.row(), self.rook_from_col)
    }

    #[inline]
    pub const fn rook_to(&self) -> Square {
        Square::at(self.row(), self.rook_to_col)
    }

    /// Columns strictly between king and rook; all must be empty.
    pub fn between_cols(&self) -> std::ops::Range<u8> {
        if self.rook_from_col > KING_START_COL {
            KING_START_COL + 1..self.rook_from_col
        } else {
            self.rook_from_col + 1..KING_START_COL
        }
    }

    /// Columns the king stands on, crosses or lands on; none may be attacked.
    pub fn king_path_cols(&self) -> [u8; 3] {
        let step: i8 = if self.king_to_col > KING_START_COL { 1 } else { -1 };
        [
            KING_START_COL,
            (KING_START_COL as i8 + step) as u8,
            self.king_to_col,
        ]
    }
}

pub const CASTLE_SIDES: [CastleSide; 4] = [
    CastleSide {
        right: CASTLE_WHITE_KINGSIDE,
        color: Color::White,
        rook_from_col: KINGSIDE_ROOK_COL,
        rook_to_col: 5,
        king_to_col: 6,
    },
    CastleSide {
        right: CASTLE_WHITE_QUEENSIDE,
        color: Color::White,
        rook_from_col: QUEENSIDE_ROOK_COL,
        rook_to_col: 3,
        king_to_col: 2,
    },
    CastleSide {
        right: CASTLE_BLACK_KINGSIDE,
        color: Color::Black,
        rook_from_col: KINGSIDE_ROOK_COL,
        rook_to_col: 5,
        king_to_col: 6,
    },
    CastleSide {
        right: CASTLE_BLACK_QUEENSIDE,
        color: Color::Black,
        rook_from_col: QUEENSIDE_ROOK_COL,
        rook_to_col: 3,
        king_to_col: 2,
    },
];

/// Castling option whose king move is `from -> to`, if any.
pub fn castle_side_for_king_move(color: Color, from: Square, to: Square) -> Option<&'static CastleSide> {
    CASTLE_SIDES
        .iter()
        .find(|side| side.color == color && side.king_from() == from && side.king_to() == to)
}

/// Castling right tied to a rook corner square, if the square is one.
pub fn castling_right_for_corner(square: Square) -> Option<CastlingRights> {
    CASTLE_SIDES
        .iter()
        .find(|side| side.rook_from() == square)
        .map(|side| side.right)
}

/// Both castling rights of one color.
#[inline]
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_their_rights() {
        assert_eq!(castling_right_for_corner(Square::at(7, 7)), Some(CASTLE_WHITE_KINGSIDE));
        assert_eq!(castling_right_for_corner(Square::at(7, 0)), Some(CASTLE_WHITE_QUEENSIDE));
        assert_eq!(castling_right_for_corner(Square::at(0, 7)), Some(CASTLE_BLACK_KINGSIDE));
        assert_eq!(castling_right_for_corner(Square::at(0, 0)), Some(CASTLE_BLACK_QUEENSIDE));
        assert_eq!(castling_right_for_corner(Square::at(7, 4)), None);
    }

    #[test]
    fn queenside_requires_three_empty_columns() {
        let queenside = castle_side_for_king_move(Color::White, Square::at(7, 4), Square::at(7, 2))
            .expect("white queenside castle");
        assert_eq!(queenside.between_cols().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(queenside.king_path_cols(), [4, 3, 2]);
        assert_eq!(queenside.rook_to(), Square::at(7, 3));
    }
}
