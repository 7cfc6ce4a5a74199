//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The side the search is run for maximizes and its opponent minimizes; every
//! leaf is scored from the searching side's perspective. Moves are tried
//! captures first (most valuable victim first) and the board is mutated with
//! make/unmake pairs, so each subtree hands the position back unchanged.
//!
//! At the root every move is searched with the window `(best - 1, +inf)`.
//! Moves that tie the best score therefore come back with exact scores, and
//! one of them is picked at random.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::BoardScorer;

/// Bound wider than any reachable evaluation.
pub const INF: i32 = 1_000_000;
/// Score of being mated at the root under `MateScoring::Distinguished`.
pub const MATE_SCORE: i32 = 500_000;

/// How a node without legal moves is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MateScoring {
    /// Static evaluation, exactly like a depth-0 leaf.
    #[default]
    Static,
    /// Checkmate scores `±(MATE_SCORE - ply)`, stalemate scores 0.
    Distinguished,
}

impl FromStr for MateScoring {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(MateScoring::Static),
            "distinguished" | "mate" => Ok(MateScoring::Distinguished),
            _ => Err(ChessError::InvalidOption {
                name: "MateScoring".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Search depth in plies.
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChessError::InvalidOption {
                name: "Difficulty".to_owned(),
                value: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search; 0 is treated as 1.
    pub depth: u8,
    pub mate_scoring: MateScoring,
    /// Tie-break seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            depth: difficulty.depth(),
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: Difficulty::default().depth(),
            mate_scoring: MateScoring::Static,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
    /// Root moves sharing the best score.
    pub tied_moves: usize,
}

/// Captures first, most valuable victim first; quiet moves keep their order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(mv.captured.map_or(0, |piece| piece.kind.value())));
}

pub struct MinimaxSearch<G: MoveGenerator, S: BoardScorer> {
    generator: G,
    scorer: S,
    config: SearchConfig,
    rng: StdRng,
}

impl<G: MoveGenerator, S: BoardScorer> MinimaxSearch<G, S> {
    pub fn new(generator: G, scorer: S, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
            rng: seeded_rng(config.seed),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    pub fn set_mate_scoring(&mut self, mate_scoring: MateScoring) {
        self.config.mate_scoring = mate_scoring;
    }

    /// Restarts the tie-break stream.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
        self.rng = seeded_rng(seed);
    }

    /// Best move for `side` in `game_state`.
    ///
    /// `best_move` is `None` when `side` has no legal move (or a promotion is
    /// still pending); callers detect mate and stalemate before searching.
    pub fn search(&mut self, game_state: &GameState, side: Color) -> ChessResult<SearchResult> {
        let depth = self.config.depth.max(1);
        let mut root = *game_state;
        root.side_to_move = side;

        let mut moves = self.generator.generate_legal_moves(&root);
        let mut nodes = 1u64;
        if moves.is_empty() {
            debug!(%side, depth, "search root has no legal moves");
            return Ok(SearchResult {
                best_move: None,
                best_score: self.scorer.score(&root, side),
                nodes,
                tied_moves: 0,
            });
        }
        order_moves(&mut moves);

        let mut best_score = -INF;
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let undo = make_move(&mut root, mv)?;
            let score = self.minimax(&mut root, depth - 1, best_score - 1, INF, side, 1, &mut nodes)?;
            unmake_move(&mut root, undo);

            best_score = best_score.max(score);
            scored.push((mv, score));
        }

        let tied: Vec<Move> = scored
            .iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(mv, _)| *mv)
            .collect();
        let best_move = tied.as_slice().choose(&mut self.rng).copied();

        debug!(
            %side,
            depth,
            nodes,
            best_score,
            tied_moves = tied.len(),
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            best_score,
            nodes,
            tied_moves: tied.len(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizer: Color,
        ply: i32,
        nodes: &mut u64,
    ) -> ChessResult<i32> {
        *nodes += 1;

        if depth == 0 {
            return Ok(self.scorer.score(game_state, maximizer));
        }

        let mut moves = self.generator.generate_legal_moves(game_state);
        if moves.is_empty() {
            return Ok(self.terminal_score(game_state, maximizer, ply));
        }
        order_moves(&mut moves);

        if game_state.side_to_move == maximizer {
            let mut best = -INF;
            for mv in moves {
                let undo = make_move(game_state, mv)?;
                let score = self.minimax(game_state, depth - 1, alpha, beta, maximizer, ply + 1, nodes)?;
                unmake_move(game_state, undo);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = INF;
            for mv in moves {
                let undo = make_move(game_state, mv)?;
                let score = self.minimax(game_state, depth - 1, alpha, beta, maximizer, ply + 1, nodes)?;
                unmake_move(game_state, undo);

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        }
    }

    fn terminal_score(&self, game_state: &GameState, maximizer: Color, ply: i32) -> i32 {
        match self.config.mate_scoring {
            MateScoring::Static => self.scorer.score(game_state, maximizer),
            MateScoring::Distinguished => {
                let side = game_state.side_to_move;
                if !is_king_in_check(game_state, side) {
                    0
                } else if side == maximizer {
                    -(MATE_SCORE - ply)
                } else {
                    MATE_SCORE - ply
                }
            }
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
