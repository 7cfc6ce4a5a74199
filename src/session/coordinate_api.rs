//! Row/column entry points for front ends.
//!
//! Callers such as a board widget or a remote relay deal in raw
//! `(row, col)` integers and may send anything; coordinates are range
//! checked here before any rule runs.

use tracing::error;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::game_outcome;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_generator::{self, validated_move, LegalMoveGenerator};
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::minimax::{MinimaxSearch, SearchConfig};

/// `(row, col)` as supplied by a caller.
pub type Coord = (i32, i32);

#[inline]
fn square(coord: Coord) -> ChessResult<Square> {
    Square::new(coord.0, coord.1)
}

/// Fully legal move check; out-of-range coordinates are simply illegal.
pub fn is_legal_move(game_state: &GameState, from: Coord, to: Coord, side: Color) -> bool {
    check_move(game_state, from, to, side).is_ok()
}

/// Like [`is_legal_move`] but says why a move is rejected.
pub fn check_move(game_state: &GameState, from: Coord, to: Coord, side: Color) -> ChessResult<()> {
    legal_move_generator::check_move(game_state, square(from)?, square(to)?, side)
}

/// Validates and applies a move for the side to move.
///
/// Returns the new state and whether a promotion is now pending. The input
/// state is never modified.
pub fn apply_move(
    game_state: &GameState,
    from: Coord,
    to: Coord,
    promotion: Option<PieceKind>,
) -> ChessResult<(GameState, bool)> {
    let mv = validated_move(
        game_state,
        square(from)?,
        square(to)?,
        game_state.side_to_move,
        promotion,
    )?;
    let next = legal_move_apply::apply_move(game_state, mv)?;
    let pending = next.pending_promotion.is_some();
    Ok((next, pending))
}

/// Completes a pending promotion.
pub fn resolve_promotion(game_state: &GameState, kind: Option<PieceKind>) -> ChessResult<GameState> {
    legal_move_apply::resolve_promotion(game_state, kind)
}

pub fn classify(game_state: &GameState, side: Color) -> ChessResult<GameStatus> {
    game_outcome::classify(game_state, side)
}

/// Best move for `side` searched `depth` plies deep, ties broken at random.
pub fn best_move(game_state: &GameState, side: Color, depth: u8) -> Option<Move> {
    search_best_move(game_state, side, depth, None)
}

/// [`best_move`] with a fixed tie-break seed.
pub fn best_move_seeded(game_state: &GameState, side: Color, depth: u8, seed: u64) -> Option<Move> {
    search_best_move(game_state, side, depth, Some(seed))
}

fn search_best_move(game_state: &GameState, side: Color, depth: u8, seed: Option<u64>) -> Option<Move> {
    let config = SearchConfig {
        depth,
        seed,
        ..SearchConfig::default()
    };
    let mut search = MinimaxSearch::new(LegalMoveGenerator, PieceSquareScorer, config);
    match search.search(game_state, side) {
        Ok(result) => result.best_move,
        Err(err) => {
            error!(%err, "search failed");
            None
        }
    }
}
