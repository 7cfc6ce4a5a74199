//! Raw move legality, attack detection and check queries.
//!
//! "Raw" means shape, path and occupancy only; whether the mover's own king
//! is left in check is decided by the full legality filter in
//! `legal_move_generator`.

use tracing::error;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::{bishop_attacks, is_bishop_move_raw};
use crate::move_generation::legal_moves_king::{is_king_move_raw, king_attacks};
use crate::move_generation::legal_moves_knight::{is_knight_move_raw, knight_attacks};
use crate::move_generation::legal_moves_pawn::{is_pawn_move_raw, pawn_attacks};
use crate::move_generation::legal_moves_queen::{is_queen_move_raw, queen_attacks};
use crate::move_generation::legal_moves_rook::{is_rook_move_raw, rook_attacks};

/// Piece-specific legality of `from -> to` for `side`, ignoring own-king safety.
///
/// The source must hold a piece of `side` and the destination must not hold
/// one of its own pieces.
pub fn is_legal_raw(game_state: &GameState, from: Square, to: Square, side: Color) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = game_state.piece_at(from) else {
        return false;
    };
    if piece.color != side || game_state.board.color_at(to) == Some(side) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => is_pawn_move_raw(game_state, from, to, side),
        PieceKind::Knight => is_knight_move_raw(game_state, from, to, side),
        PieceKind::Bishop => is_bishop_move_raw(game_state, from, to, side),
        PieceKind::Rook => is_rook_move_raw(game_state, from, to, side),
        PieceKind::Queen => is_queen_move_raw(game_state, from, to, side),
        PieceKind::King => is_king_move_raw(game_state, from, to, side),
    }
}

/// Whether `piece` standing on `from` attacks `target`. Castling and pawn
/// pushes never attack.
#[inline]
pub fn piece_attacks_square(board: &Board, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, target, piece.color),
        PieceKind::Knight => knight_attacks(from, target),
        PieceKind::Bishop => bishop_attacks(board, from, target),
        PieceKind::Rook => rook_attacks(board, from, target),
        PieceKind::Queen => queen_attacks(board, from, target),
        PieceKind::King => king_attacks(from, target),
    }
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let board = &game_state.board;
    board
        .pieces_of(attacker_color)
        .any(|(from, piece)| piece_attacks_square(board, piece, from, square))
}

/// Every piece of `attacker_color` attacking `square`.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let board = &game_state.board;
    board
        .pieces_of(attacker_color)
        .filter(|(from, piece)| piece_attacks_square(board, *piece, *from, square))
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state.board.king_square(color)
}

/// A side without a king is reported as in check.
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        error!(side = %color, "king missing from board; treating as check");
        return true;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}
