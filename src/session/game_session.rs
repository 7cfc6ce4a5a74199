//! A running game: current position, status, history and the computer seat.
//!
//! Every move, whether typed locally, relayed from another instance or chosen
//! by the engine, goes through `submit_move`, so all of them are validated
//! the same way. The position only changes once a move is accepted.

use tracing::{error, info, warn};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::game_outcome::classify;
use crate::move_generation::legal_move_apply::{apply_move, resolve_promotion};
use crate::move_generation::legal_move_generator::{needs_promotion, validated_move};
use crate::search::minimax::{Difficulty, MateScoring, SearchConfig};
use crate::utils::move_notation::move_notation;

/// What happens when a pawn reaches the last rank without a chosen piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromotionPolicy {
    /// Leave the promotion pending until `resolve_promotion` is called.
    #[default]
    Ask,
    AutoQueen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiConfig {
    pub color: Color,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Computer opponent; `None` for two human players.
    pub ai: Option<AiConfig>,
    pub promotion: PromotionPolicy,
    /// Tie-break seed for the engine.
    pub seed: Option<u64>,
    pub mate_scoring: MateScoring,
}

impl SessionConfig {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self
                .ai
                .map_or(Difficulty::default(), |ai| ai.difficulty)
                .depth(),
            mate_scoring: self.mate_scoring,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    /// History text such as `P: e2-e4`.
    pub notation: String,
    /// Position before the move; restored by `take_back`.
    pub before: GameState,
    pub status_after: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Played { mv: Move, status: GameStatus },
    /// The pawn stands on the given square waiting for a piece kind.
    PromotionPending(Square),
}

#[derive(Debug, Clone, Copy)]
struct PendingPromotion {
    mv: Move,
    before: GameState,
}

pub struct Game {
    state: GameState,
    status: GameStatus,
    history: Vec<MoveRecord>,
    pending: Option<PendingPromotion>,
    config: SessionConfig,
    engine: Box<dyn Engine>,
}

impl Game {
    pub fn new(config: SessionConfig) -> Self {
        let engine = Box::new(MinimaxEngine::new(config.search_config()));
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: SessionConfig, engine: Box<dyn Engine>) -> Self {
        Self {
            state: GameState::new_game(),
            status: GameStatus::Ongoing,
            history: Vec::new(),
            pending: None,
            config,
            engine,
        }
    }

    /// Starts from an arbitrary position, e.g. one parsed from FEN.
    pub fn from_position(config: SessionConfig, state: GameState) -> ChessResult<Self> {
        let mut game = Self::new(config);
        game.status = classify(&state, state.side_to_move)?;
        game.state = state;
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.state.pending_promotion
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.status.is_over()
            && self.pending.is_none()
            && self
                .config
                .ai
                .is_some_and(|ai| ai.color == self.state.side_to_move)
    }

    /// Turns the computer seat on or off, or changes its difficulty.
    pub fn set_ai(&mut self, ai: Option<AiConfig>) -> ChessResult<()> {
        if let Some(ai) = ai {
            self.engine
                .set_option("Difficulty", &ai.difficulty.to_string())?;
        }
        self.config.ai = ai;
        info!(?ai, "computer seat updated");
        Ok(())
    }

    /// Starts a new game with the same configuration.
    pub fn reset(&mut self) {
        self.state = GameState::new_game();
        self.status = GameStatus::Ongoing;
        self.history.clear();
        self.pending = None;
        self.engine.new_game();
        info!("game reset");
    }

    /// Validates and plays `from -> to` for the side to move.
    ///
    /// Used for local input and for moves relayed from a remote peer alike.
    /// On error the game is left exactly as it was.
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveOutcome> {
        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }
        let side = self.state.side_to_move;
        let mut mv = match validated_move(&self.state, from, to, side, promotion) {
            Ok(mv) => mv,
            Err(err) => {
                warn!(%side, %from, %to, %err, "move rejected");
                return Err(err);
            }
        };
        if mv.promotion.is_none()
            && self.config.promotion == PromotionPolicy::AutoQueen
            && needs_promotion(&self.state, from, to)
        {
            mv.promotion = Some(PieceKind::Queen);
        }

        let next = apply_move(&self.state, mv)?;
        if let Some(square) = next.pending_promotion {
            self.pending = Some(PendingPromotion {
                mv,
                before: self.state,
            });
            self.state = next;
            info!(%side, %square, "promotion pending");
            return Ok(MoveOutcome::PromotionPending(square));
        }

        let before = self.state;
        self.finish_move(before, mv, next)
    }

    /// Supplies the piece kind for a pending promotion.
    pub fn resolve_promotion(&mut self, kind: Option<PieceKind>) -> ChessResult<MoveOutcome> {
        let pending = self.pending.ok_or(ChessError::NoPromotionPending)?;
        let next = resolve_promotion(&self.state, kind)?;
        let mv = pending.mv.with_promotion(kind);
        self.pending = None;
        self.finish_move(pending.before, mv, next)
    }

    /// Lets the engine play for the side to move.
    ///
    /// Returns `Ok(None)` when the engine finds no move.
    pub fn play_ai_move(&mut self) -> ChessResult<Option<MoveOutcome>> {
        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }
        if let Some(square) = self.state.pending_promotion {
            return Err(ChessError::PromotionPending(square));
        }
        let output = self.engine.choose_move(
            &self.state,
            &GoParams {
                depth: None,
                side: Some(self.state.side_to_move),
            },
        )?;
        let Some(mv) = output.best_move else {
            return Ok(None);
        };
        // Engine moves always carry a promotion kind, so this never pends.
        self.submit_move(mv.from, mv.to, mv.promotion).map(Some)
    }

    /// Takes back the last move, or cancels a pending promotion.
    pub fn take_back(&mut self) -> Option<GameState> {
        if let Some(pending) = self.pending.take() {
            self.state = pending.before;
            self.status = GameStatus::Ongoing;
            info!("pending promotion cancelled");
            return Some(self.state);
        }
        let record = self.history.pop()?;
        self.state = record.before;
        self.status = GameStatus::Ongoing;
        info!(notation = %record.notation, "move taken back");
        Some(self.state)
    }

    fn finish_move(&mut self, before: GameState, mv: Move, next: GameState) -> ChessResult<MoveOutcome> {
        let status = match classify(&next, next.side_to_move) {
            Ok(status) => status,
            Err(err) => {
                error!(%err, "position after move is corrupt");
                return Err(err);
            }
        };
        let notation = move_notation(&before, &mv).unwrap_or_default();
        info!(side = %before.side_to_move, %notation, %status, "move played");

        self.history.push(MoveRecord {
            mv,
            notation,
            before,
            status_after: status,
        });
        self.state = next;
        self.status = status;
        if status.is_over() {
            info!(%status, winner = ?self.winner(), "game over");
        }
        Ok(MoveOutcome::Played { mv, status })
    }

    /// The side that delivered checkmate, if any.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then(|| self.state.side_to_move.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    fn play(game: &mut Game, moves: &[((u8, u8), (u8, u8))]) {
        for &((fr, fc), (tr, tc)) in moves {
            game.submit_move(sq(fr, fc), sq(tr, tc), None)
                .expect("scripted move should be legal");
        }
    }

    #[test]
    fn records_history_with_notation() {
        let mut game = Game::new(SessionConfig::default());
        play(&mut game, &[((6, 4), (4, 4)), ((0, 6), (2, 5))]);
        let notation: Vec<&str> = game.history().iter().map(|r| r.notation.as_str()).collect();
        assert_eq!(notation, vec!["P: e2-e4", "n: g8-f6"]);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn rejected_move_leaves_game_unchanged() {
        let mut game = Game::new(SessionConfig::default());
        let before = *game.state();
        assert!(game.submit_move(sq(6, 4), sq(3, 4), None).is_err());
        assert!(game.submit_move(sq(4, 4), sq(3, 4), None).is_err());
        assert_eq!(*game.state(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new(SessionConfig::default());
        play(
            &mut game,
            &[((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))],
        );
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.winner(), Some(Color::Black));
        assert!(matches!(
            game.submit_move(sq(6, 0), sq(5, 0), None),
            Err(ChessError::GameOver(GameStatus::Checkmate))
        ));
    }

    #[test]
    fn promotion_waits_for_piece_kind() {
        let state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let mut game = Game::from_position(SessionConfig::default(), state).expect("valid position");

        let outcome = game.submit_move(sq(1, 0), sq(0, 0), None).expect("legal push");
        assert_eq!(outcome, MoveOutcome::PromotionPending(sq(0, 0)));
        assert_eq!(game.side_to_move(), Color::White);
        assert!(matches!(
            game.submit_move(sq(7, 4), sq(7, 3), None),
            Err(ChessError::PromotionPending(_))
        ));
        assert_eq!(game.resolve_promotion(None), Err(ChessError::AmbiguousPromotion(sq(0, 0))));

        game.resolve_promotion(Some(PieceKind::Rook)).expect("rook is allowed");
        assert_eq!(
            game.state().piece_at(sq(0, 0)),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history()[0].notation, "P: a7-a8=R");
    }

    #[test]
    fn auto_queen_policy_promotes_immediately() {
        let config = SessionConfig {
            promotion: PromotionPolicy::AutoQueen,
            ..SessionConfig::default()
        };
        let state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let mut game = Game::from_position(config, state).expect("valid position");
        let outcome = game.submit_move(sq(1, 0), sq(0, 0), None).expect("legal push");
        assert!(matches!(outcome, MoveOutcome::Played { .. }));
        assert_eq!(
            game.state().piece_at(sq(0, 0)),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }

    #[test]
    fn take_back_restores_previous_position() {
        let mut game = Game::new(SessionConfig::default());
        let start = *game.state();
        play(&mut game, &[((6, 4), (4, 4))]);
        assert_eq!(game.take_back(), Some(start));
        assert_eq!(game.take_back(), None);
    }

    #[test]
    fn ai_answers_as_black() {
        let config = SessionConfig {
            ai: Some(AiConfig {
                color: Color::Black,
                difficulty: Difficulty::Easy,
            }),
            seed: Some(11),
            ..SessionConfig::default()
        };
        let mut game = Game::new(config);
        assert!(!game.is_ai_turn());
        play(&mut game, &[((6, 4), (4, 4))]);
        assert!(game.is_ai_turn());

        let outcome = game.play_ai_move().expect("engine runs");
        assert!(matches!(outcome, Some(MoveOutcome::Played { .. })));
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn reset_clears_history() {
        let mut game = Game::new(SessionConfig::default());
        play(&mut game, &[((6, 4), (4, 4))]);
        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(*game.state(), GameState::new_game());
    }

    #[test]
    fn missing_king_is_reported() {
        let state = GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        assert!(matches!(
            Game::from_position(SessionConfig::default(), state),
            Err(ChessError::MissingKing(Color::Black))
        ));
    }
}
