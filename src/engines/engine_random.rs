//! Random-move engine.
//!
//! Selects uniformly from legal moves and is mainly used for diagnostics,
//! integration testing and the weakest opponent setting.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{parse_seed_option, Engine, EngineOutput, GoParams};
use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Seed") {
            self.rng = match parse_seed_option(value)? {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
        }
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let side = params.side.unwrap_or(game_state.side_to_move);
        let legal_moves = generate_legal_moves(game_state, side);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move() {
        let game = GameState::new_game();
        let mut engine = RandomEngine::with_seed(9);
        let out = engine
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        let mv = out.best_move.expect("start position has moves");
        assert!(generate_legal_moves(&game, Color::White).contains(&mv));
    }

    #[test]
    fn returns_none_when_mated() {
        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("valid FEN");
        let mut engine = RandomEngine::with_seed(1);
        let out = engine
            .choose_move(&mated, &GoParams::default())
            .expect("engine runs");
        assert_eq!(out.best_move, None);
    }

    #[test]
    fn rejects_malformed_seed() {
        let mut engine = RandomEngine::new();
        assert!(engine.set_option("Seed", "abc").is_err());
        assert!(engine.set_option("Seed", "12").is_ok());
        assert!(engine.set_option("Ponder", "whatever").is_ok());
    }
}
