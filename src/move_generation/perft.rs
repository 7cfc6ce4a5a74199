//! Perft node counting used to validate move generation against published
//! reference counts.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    let mut scratch = *game_state;
    perft_recurse(generator, &mut scratch, depth, &mut counts)?;
    Ok(counts)
}

/// Leaf count per root move, useful when bisecting a generator mismatch.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> ChessResult<Vec<(Move, usize)>> {
    let mut scratch = *game_state;
    let mut out = Vec::new();
    for mv in generator.generate_legal_moves(game_state) {
        let undo = make_move(&mut scratch, mv)?;
        let nodes = perft(generator, &scratch, depth.saturating_sub(1))?.nodes;
        unmake_move(&mut scratch, undo);
        out.push((mv, nodes));
    }
    Ok(out)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let moves = generator.generate_legal_moves(game_state);
    let mover = game_state.side_to_move;

    for mv in moves {
        let undo = make_move(game_state, mv)?;
        if depth == 1 {
            tally_leaf(generator, game_state, &undo, mover, counts);
        } else {
            perft_recurse(generator, game_state, depth - 1, counts)?;
        }
        unmake_move(game_state, undo);
    }
    Ok(())
}

fn tally_leaf<G: MoveGenerator>(
    generator: &G,
    after: &GameState,
    undo: &UndoState,
    mover: Color,
    counts: &mut PerftCounts,
) {
    let mv = undo.mv;
    let before = &undo.prior;
    counts.nodes += 1;

    if mv.is_capture() {
        counts.captures += 1;
        if before.board.is_empty(mv.to) {
            counts.en_passant += 1;
        }
    }
    let king_move = before
        .piece_at(mv.from)
        .is_some_and(|piece| piece.kind == PieceKind::King);
    if king_move && (mv.to.col as i8 - mv.from.col as i8).abs() == 2 {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }
    if is_king_in_check(after, mover.opposite()) {
        counts.checks += 1;
        if generator.generate_legal_moves(after).is_empty() {
            counts.checkmates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    #[test]
    fn startpos_depth_two_and_three() {
        let game = GameState::new_game();
        assert_eq!(perft(&LegalMoveGenerator, &game, 2).expect("perft").nodes, 400);
        let three = perft(&LegalMoveGenerator, &game, 3).expect("perft");
        assert_eq!(three.nodes, 8902);
        assert_eq!(three.captures, 34);
        assert_eq!(three.checks, 12);
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = GameState::new_game();
        let divided = perft_divide(&LegalMoveGenerator, &game, 2).expect("divide");
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }
}
