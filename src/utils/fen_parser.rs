//! FEN-to-GameState parser.
//!
//! FEN lists ranks from 8 down to 1, which lines up directly with board rows
//! 0 to 7. King counts are not validated here so deliberately broken
//! positions can still be built for tests.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional; many hand-written positions omit them.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();
    parse_board(board_part, &mut game_state.board)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square =
        parse_en_passant_square(en_passant_part, game_state.side_to_move)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0usize;

        for ch in row_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = Piece::from_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if col >= 8 {
                return Err(invalid("rank has too many files"));
            }
            board.set(Square::at(row as u8, col as u8), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        }
    }
    Ok(rights)
}

/// The target sits behind a pawn that just double-pushed, so it must be on
/// rank 6 when White is to move and rank 3 when Black is.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
    let expected_row = match side_to_move {
        Color::White => 2,
        Color::Black => 5,
    };
    if square.row != expected_row {
        return Err(invalid(format!(
            "en-passant square {en_passant_part} does not follow a {} double push",
            side_to_move.opposite()
        )));
    }
    Ok(Some(square))
}
