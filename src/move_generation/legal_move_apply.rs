//! Move execution.
//!
//! `apply_move` assumes the move already passed full legality. It relocates
//! the piece and then updates every piece of state that is not visible on the
//! squares: en-passant capture, castling rook relocation, castling rights,
//! en-passant target, promotion and clocks. `make_move`/`unmake_move` wrap it
//! with a full snapshot for search.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    castle_side_for_king_move, castling_right_for_corner, castling_rights_of,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_pawn::{en_passant_victim_square, is_en_passant_capture};

pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let mut next = *game_state;
    apply_move_in_place(&mut next, mv)?;
    Ok(next)
}

/// Applies `mv` and returns the record needed to take it back.
pub fn make_move(game_state: &mut GameState, mv: Move) -> ChessResult<UndoState> {
    let prior = *game_state;
    apply_move_in_place(game_state, mv)?;
    Ok(UndoState { mv, prior })
}

#[inline]
pub fn unmake_move(game_state: &mut GameState, undo: UndoState) {
    *game_state = undo.prior;
}

fn apply_move_in_place(game_state: &mut GameState, mv: Move) -> ChessResult<()> {
    let from = mv.from;
    let to = mv.to;
    let moved = game_state
        .piece_at(from)
        .ok_or_else(|| ChessError::illegal(from, to, "no piece on the source square"))?;
    let mover = moved.color;

    if let Some(promo) = mv.promotion {
        if !promo.is_promotion_target() {
            return Err(ChessError::InvalidPromotionPiece(promo));
        }
    }

    let en_passant = moved.kind == PieceKind::Pawn && is_en_passant_capture(game_state, from, to, mover);
    let board = &mut game_state.board;

    // Relocate the piece.
    board.take(from);
    let captured = board.get(to);
    board.set(to, Some(moved));

    if en_passant {
        board.take(en_passant_victim_square(from, to));
    }

    // A rook taken on its corner loses its castling right.
    if captured.is_some() {
        if let Some(right) = castling_right_for_corner(to) {
            game_state.castling_rights &= !right;
        }
    }

    if moved.kind == PieceKind::King {
        if let Some(side) = castle_side_for_king_move(mover, from, to) {
            let rook = game_state.board.take(side.rook_from());
            game_state.board.set(side.rook_to(), rook);
        }
        game_state.castling_rights &= !castling_rights_of(mover);
    }

    if moved.kind == PieceKind::Rook {
        if let Some(right) = castling_right_for_corner(from) {
            if from.row == mover.back_row() {
                game_state.castling_rights &= !right;
            }
        }
    }

    game_state.en_passant_square = if moved.kind == PieceKind::Pawn
        && (to.row as i8 - from.row as i8).abs() == 2
    {
        from.offset(mover.pawn_direction(), 0)
    } else {
        None
    };

    if moved.kind == PieceKind::Pawn || captured.is_some() || en_passant {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }

    if moved.kind == PieceKind::Pawn && to.row == mover.promotion_row() {
        match mv.promotion {
            Some(kind) => game_state.board.set(to, Some(Piece::new(mover, kind))),
            None => {
                // Turn stays with the mover until the piece kind is supplied.
                game_state.pending_promotion = Some(to);
                return Ok(());
            }
        }
    }

    pass_turn(game_state, mover);
    Ok(())
}

/// Completes a pending promotion and passes the turn.
pub fn resolve_promotion(game_state: &GameState, kind: Option<PieceKind>) -> ChessResult<GameState> {
    let square = game_state
        .pending_promotion
        .ok_or(ChessError::NoPromotionPending)?;
    let kind = kind.ok_or(ChessError::AmbiguousPromotion(square))?;
    if !kind.is_promotion_target() {
        return Err(ChessError::InvalidPromotionPiece(kind));
    }
    let pawn = game_state
        .piece_at(square)
        .filter(|piece| piece.kind == PieceKind::Pawn)
        .ok_or(ChessError::NoPromotionPending)?;

    let mut next = *game_state;
    next.board.set(square, Some(Piece::new(pawn.color, kind)));
    next.pending_promotion = None;
    pass_turn(&mut next, pawn.color);
    Ok(next)
}

fn pass_turn(game_state: &mut GameState, mover: Color) {
    if mover == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }
    game_state.side_to_move = mover.opposite();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    fn mv(fr: u8, fc: u8, tr: u8, tc: u8) -> Move {
        Move::new(sq(fr, fc), sq(tr, tc))
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let game = GameState::new_game();
        let next = apply_move(&game, mv(6, 4, 4, 4)).expect("apply");
        assert_eq!(next.en_passant_square, Some(sq(5, 4)));
        assert_eq!(next.side_to_move, Color::Black);

        let after = apply_move(&next, mv(0, 6, 2, 5)).expect("apply");
        assert_eq!(after.en_passant_square, None);
        assert_eq!(after.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_pawn_behind_destination() {
        let game = GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("valid FEN");
        let next = apply_move(&game, mv(4, 3, 5, 4)).expect("apply");
        assert_eq!(next.piece_at(sq(4, 4)), None);
        assert_eq!(
            next.piece_at(sq(5, 4)),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn kingside_castle_moves_rook() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid FEN");
        let next = apply_move(&game, mv(7, 4, 7, 6)).expect("apply");
        assert_eq!(next.piece_at(sq(7, 5)), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(next.piece_at(sq(7, 7)), None);
        assert_eq!(next.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn queenside_castle_moves_rook() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("valid FEN");
        let next = apply_move(&game, mv(0, 4, 0, 2)).expect("apply");
        assert_eq!(next.piece_at(sq(0, 3)), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(next.piece_at(sq(0, 0)), None);
        assert_eq!(next.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    }

    #[test]
    fn rook_moves_and_captures_clear_single_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid FEN");
        let next = apply_move(&game, mv(7, 0, 6, 0)).expect("apply");
        assert_eq!(next.castling_rights, CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE);

        let capture = apply_move(&game, mv(7, 7, 0, 7)).expect("apply");
        assert_eq!(
            capture.castling_rights,
            CASTLE_ALL & !CASTLE_WHITE_KINGSIDE & !CASTLE_BLACK_KINGSIDE
        );
    }

    #[test]
    fn promotion_without_kind_pauses_the_turn() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let pending = apply_move(&game, mv(1, 0, 0, 0)).expect("apply");
        assert_eq!(pending.pending_promotion, Some(sq(0, 0)));
        assert_eq!(pending.side_to_move, Color::White);

        assert_eq!(
            resolve_promotion(&pending, None),
            Err(ChessError::AmbiguousPromotion(sq(0, 0)))
        );
        let done = resolve_promotion(&pending, Some(PieceKind::Knight)).expect("resolve");
        assert_eq!(done.piece_at(sq(0, 0)), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(done.pending_promotion, None);
        assert_eq!(done.side_to_move, Color::Black);
    }

    #[test]
    fn promotion_with_kind_completes_immediately() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").expect("valid FEN");
        let next = apply_move(&game, mv(6, 0, 7, 0).with_promotion(Some(PieceKind::Queen)))
            .expect("apply");
        assert_eq!(next.piece_at(sq(7, 0)), Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(next.side_to_move, Color::White);
        assert_eq!(
            apply_move(&game, mv(6, 0, 7, 0).with_promotion(Some(PieceKind::King))),
            Err(ChessError::InvalidPromotionPiece(PieceKind::King))
        );
    }

    #[test]
    fn unmake_restores_prior_state() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("valid FEN");
        let before = game;
        let undo = make_move(&mut game, mv(7, 4, 7, 2)).expect("make");
        assert_ne!(game, before);
        unmake_move(&mut game, undo);
        assert_eq!(game, before);
    }
}
