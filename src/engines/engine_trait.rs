//! Engine abstraction layer used by the game session and the CLI.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth for this call.
    pub depth: Option<u8>,
    /// Side to choose a move for; defaults to the side to move.
    pub side: Option<Color>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub best_score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Unknown option names are ignored; malformed values are errors.
    fn set_option(&mut self, _name: &str, _value: &str) -> ChessResult<()> {
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput>;
}

/// Parses an optional numeric seed option; `"none"`/`"random"` clears it.
pub(crate) fn parse_seed_option(value: &str) -> ChessResult<Option<u64>> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("random") {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ChessError::InvalidOption {
            name: "Seed".to_owned(),
            value: value.to_owned(),
        })
}
