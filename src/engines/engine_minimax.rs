//! Difficulty-driven minimax engine backing the computer opponent.

use crate::engines::engine_trait::{parse_seed_option, Engine, EngineOutput, GoParams};
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::minimax::{Difficulty, MinimaxSearch, SearchConfig};
use crate::utils::algebraic::move_to_long_algebraic;

pub struct MinimaxEngine {
    search: MinimaxSearch<LegalMoveGenerator, PieceSquareScorer>,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: MinimaxSearch::new(LegalMoveGenerator, PieceSquareScorer, config),
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(SearchConfig::for_difficulty(difficulty))
    }

    pub fn config(&self) -> SearchConfig {
        self.search.config()
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth = value
                .trim()
                .parse::<u8>()
                .map_err(|_| ChessError::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })?;
            self.search.set_depth(depth);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Difficulty") {
            self.search.set_depth(value.parse::<Difficulty>()?.depth());
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            self.search.reseed(parse_seed_option(value)?);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MateScoring") {
            self.search.set_mate_scoring(value.parse()?);
            return Ok(());
        }
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let side = params.side.unwrap_or(game_state.side_to_move);
        let configured_depth = self.search.config().depth;
        if let Some(depth) = params.depth {
            self.search.set_depth(depth);
        }
        let result = self.search.search(game_state, side);
        self.search.set_depth(configured_depth);
        let result = result?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            best_score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "minimax depth {} nodes {} score {} ties {}",
            params.depth.unwrap_or(configured_depth).max(1),
            result.nodes,
            result.best_score,
            result.tied_moves
        ));
        if let Some(mv) = result.best_move {
            out.info_lines
                .push(format!("minimax bestmove {}", move_to_long_algebraic(&mv)));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::minimax::MateScoring;

    #[test]
    fn options_update_the_search_config() {
        let mut engine = MinimaxEngine::default();
        engine.set_option("Difficulty", "hard").expect("valid difficulty");
        assert_eq!(engine.config().depth, 4);
        engine.set_option("depth", "2").expect("valid depth");
        assert_eq!(engine.config().depth, 2);
        engine
            .set_option("MateScoring", "distinguished")
            .expect("valid mate scoring");
        assert_eq!(engine.config().mate_scoring, MateScoring::Distinguished);
        engine.set_option("Seed", "17").expect("valid seed");
        assert_eq!(engine.config().seed, Some(17));

        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("Difficulty", "grandmaster").is_err());
    }

    #[test]
    fn depth_override_is_temporary() {
        let mut engine = MinimaxEngine::with_difficulty(Difficulty::Easy);
        engine.set_option("Seed", "3").expect("valid seed");
        let game = GameState::new_game();
        let out = engine
            .choose_move(
                &game,
                &GoParams {
                    depth: Some(1),
                    side: None,
                },
            )
            .expect("engine runs");
        assert!(out.best_move.is_some());
        assert!(out.info_lines[0].starts_with("minimax depth 1 "));
        assert_eq!(engine.config().depth, 2);
    }

    #[test]
    fn takes_free_material() {
        let game = GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("valid FEN");
        let mut engine = MinimaxEngine::with_difficulty(Difficulty::Easy);
        let out = engine
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        assert_eq!(out.best_move.map(|mv| mv.to), Some(Square::at(3, 3)));
    }
}
