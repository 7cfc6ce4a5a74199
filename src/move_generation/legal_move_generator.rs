//! Full legal move validation and generation.
//!
//! A move is fully legal when it is raw-legal and, applied to a scratch copy
//! of the position, leaves the mover's own king out of check. Generation
//! enumerates candidate destinations per piece and keeps exactly the ones
//! the validator accepts, so both paths always agree.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_legal_raw};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::move_generation::legal_moves_bishop::bishop_targets;
use crate::move_generation::legal_moves_king::king_targets;
use crate::move_generation::legal_moves_knight::knight_targets;
use crate::move_generation::legal_moves_pawn::{
    en_passant_victim_square, is_en_passant_capture, pawn_targets,
};
use crate::move_generation::legal_moves_queen::queen_targets;
use crate::move_generation::legal_moves_rook::rook_targets;
use crate::move_generation::move_generator::MoveGenerator;

/// Validates `from -> to` for `side`, reporting why a move is rejected.
pub fn check_move(game_state: &GameState, from: Square, to: Square, side: Color) -> ChessResult<()> {
    if let Some(square) = game_state.pending_promotion {
        return Err(ChessError::PromotionPending(square));
    }
    let piece = game_state
        .piece_at(from)
        .ok_or_else(|| ChessError::illegal(from, to, "source square is empty"))?;
    if piece.color != side {
        return Err(ChessError::illegal(from, to, "piece belongs to the other side"));
    }
    if game_state.board.color_at(to) == Some(side) {
        return Err(ChessError::illegal(from, to, "destination holds an own piece"));
    }
    if !is_legal_raw(game_state, from, to, side) {
        return Err(ChessError::illegal(from, to, "piece cannot move that way"));
    }
    if leaves_king_in_check(game_state, Move::new(from, to), side)? {
        return Err(ChessError::illegal(from, to, "own king would be in check"));
    }
    Ok(())
}

/// Fully legal `from -> to` for `side`.
#[inline]
pub fn is_legal_move(game_state: &GameState, from: Square, to: Square, side: Color) -> bool {
    check_move(game_state, from, to, side).is_ok()
}

fn leaves_king_in_check(game_state: &GameState, mv: Move, side: Color) -> ChessResult<bool> {
    // Promotion kind never changes king safety; queen keeps the scratch
    // position out of the pending state.
    let mut probe = mv;
    if needs_promotion(game_state, mv.from, mv.to) {
        probe.promotion = Some(PieceKind::Queen);
    }
    let next = apply_move(game_state, probe)?;
    Ok(is_king_in_check(&next, side))
}

/// A pawn landing on its promotion row.
pub fn needs_promotion(game_state: &GameState, from: Square, to: Square) -> bool {
    game_state
        .piece_at(from)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row())
}

/// Candidate destinations for the piece on `from` (shape only).
pub fn candidate_targets(game_state: &GameState, from: Square, piece: Piece, out: &mut Vec<Square>) {
    let board = &game_state.board;
    match piece.kind {
        PieceKind::Pawn => pawn_targets(from, piece.color, out),
        PieceKind::Knight => knight_targets(from, out),
        PieceKind::Bishop => bishop_targets(board, from, out),
        PieceKind::Rook => rook_targets(board, from, out),
        PieceKind::Queen => queen_targets(board, from, out),
        PieceKind::King => king_targets(from, out),
    }
}

/// Captured piece of a legal move, counting the pawn taken en passant.
fn captured_piece(game_state: &GameState, from: Square, to: Square, side: Color) -> Option<Piece> {
    enemy_piece_on(&game_state.board, to, side).or_else(|| {
        let pawn_move = game_state
            .piece_at(from)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        if pawn_move && is_en_passant_capture(game_state, from, to, side) {
            game_state.board.get(en_passant_victim_square(from, to))
        } else {
            None
        }
    })
}

/// Validates `from -> to` for `side` and builds the full move record.
///
/// `promotion` is only kept when the pawn actually reaches its last rank;
/// `None` on a promoting move leaves the choice pending after it is applied.
pub fn validated_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    side: Color,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    check_move(game_state, from, to, side)?;
    if let Some(kind) = promotion.filter(|kind| !kind.is_promotion_target()) {
        return Err(ChessError::InvalidPromotionPiece(kind));
    }
    Ok(Move {
        from,
        to,
        promotion: promotion.filter(|_| needs_promotion(game_state, from, to)),
        captured: captured_piece(game_state, from, to, side),
    })
}

/// Every fully legal move of `side`; promotions expand into four moves.
pub fn generate_legal_moves(game_state: &GameState, side: Color) -> Vec<Move> {
    let mut legal = Vec::with_capacity(64);
    if game_state.pending_promotion.is_some() {
        return legal;
    }

    let mut targets = Vec::with_capacity(32);
    for (from, piece) in game_state.board.pieces_of(side) {
        targets.clear();
        candidate_targets(game_state, from, piece, &mut targets);
        for &to in &targets {
            if !is_legal_move(game_state, from, to, side) {
                continue;
            }
            let base = Move {
                from,
                to,
                promotion: None,
                captured: captured_piece(game_state, from, to, side),
            };
            if needs_promotion(game_state, from, to) {
                legal.extend(
                    PROMOTION_KINDS
                        .iter()
                        .map(|&kind| base.with_promotion(Some(kind))),
                );
            } else {
                legal.push(base);
            }
        }
    }
    legal
}

/// Generator over the side to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        generate_legal_moves(game_state, game_state.side_to_move)
    }
}
