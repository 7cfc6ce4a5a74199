//! Terminal front end: play against the engine or a second local player.
//!
//! Moves are typed in long algebraic form (`e2e4`, `e7e8q`) or as raw board
//! coordinates (`6 4 4 4`, row 0 being Black's back rank).

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use chess_duel::chess_errors::{ChessError, ChessResult};
use chess_duel::game_state::chess_types::*;
use chess_duel::search::minimax::{Difficulty, MateScoring};
use chess_duel::session::game_session::{AiConfig, Game, MoveOutcome, PromotionPolicy, SessionConfig};
use chess_duel::utils::algebraic::{long_algebraic_to_move, move_to_long_algebraic};
use chess_duel::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Seat {
    White,
    Black,
    Off,
}

impl Seat {
    fn color(self) -> Option<Color> {
        match self {
            Seat::White => Some(Color::White),
            Seat::Black => Some(Color::Black),
            Seat::Off => None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "chess_duel", version, about = "Terminal chess against a minimax engine")]
struct Cli {
    /// Color played by the computer; `off` for two local players.
    #[arg(long, value_enum, default_value_t = Seat::Black)]
    ai: Seat,

    /// Engine strength: easy, medium, hard or expert.
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Fixed seed for the engine's tie-break choices.
    #[arg(long)]
    seed: Option<u64>,

    /// Promote to a queen without asking.
    #[arg(long)]
    auto_queen: bool,

    /// Score checkmate and stalemate leaves explicitly instead of statically.
    #[arg(long)]
    distinguished_mates: bool,

    /// Start from this FEN instead of the initial position.
    #[arg(long)]
    fen: Option<String>,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            ai: self.ai.color().map(|color| AiConfig {
                color,
                difficulty: self.difficulty,
            }),
            promotion: if self.auto_queen {
                PromotionPolicy::AutoQueen
            } else {
                PromotionPolicy::Ask
            },
            seed: self.seed,
            mate_scoring: if self.distinguished_mates {
                MateScoring::Distinguished
            } else {
                MateScoring::Static
            },
        }
    }
}

const HELP: &str = "\
commands:
  e2e4 | e7e8q        move in long algebraic notation
  6 4 4 4 [q]         move by (row, col) coordinates
  q | r | b | n       choose the piece for a pending promotion
  ai white|black|off [difficulty]
  undo  new  board  history  fen  help  quit";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.session_config();
    let mut game = match &cli.fen {
        Some(fen) => Game::from_position(config, GameState::from_fen(fen)?)?,
        None => Game::new(config),
    };

    println!("{}", render_game_state(game.state()));
    println!("{HELP}");
    run_ai_turns(&mut game)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", game.side_to_move());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_command(&mut game, line) {
            Ok(Command::Quit) => break,
            Ok(Command::Continue) => {}
            Err(err) => println!("error: {err}"),
        }
    }

    Ok(())
}

enum Command {
    Continue,
    Quit,
}

fn handle_command(game: &mut Game, line: &str) -> ChessResult<Command> {
    let mut words = line.split_whitespace();
    match words.next().unwrap_or_default() {
        "quit" | "exit" => return Ok(Command::Quit),
        "help" => println!("{HELP}"),
        "board" => println!("{}", render_game_state(game.state())),
        "fen" => println!("{}", game.state().get_fen()),
        "history" => {
            for (i, record) in game.history().iter().enumerate() {
                println!("{:>3}. {}", i + 1, record.notation);
            }
        }
        "new" => {
            game.reset();
            println!("{}", render_game_state(game.state()));
            run_ai_turns(game)?;
        }
        "undo" => {
            game.take_back();
            // Against the engine, step back to the human's turn.
            while game.config().ai.is_some_and(|ai| ai.color == game.side_to_move())
                && game.take_back().is_some()
            {}
            println!("{}", render_game_state(game.state()));
        }
        "ai" => {
            let seat = words.next().unwrap_or("off");
            let difficulty = match words.next() {
                Some(text) => text.parse()?,
                None => game.config().ai.map_or(Difficulty::default(), |ai| ai.difficulty),
            };
            let ai = match seat {
                "white" => Some(Color::White),
                "black" => Some(Color::Black),
                "off" | "none" => None,
                other => {
                    return Err(ChessError::InvalidOption {
                        name: "ai".to_owned(),
                        value: other.to_owned(),
                    })
                }
            }
            .map(|color| AiConfig { color, difficulty });
            game.set_ai(ai)?;
            run_ai_turns(game)?;
        }
        word if game.pending_promotion().is_some() && word.len() == 1 => {
            let kind = word.chars().next().and_then(PieceKind::from_char);
            let outcome = game.resolve_promotion(kind)?;
            report(game, outcome);
            run_ai_turns(game)?;
        }
        _ => {
            let (from, to, promotion) = parse_move(line, game.state())?;
            let outcome = game.submit_move(from, to, promotion)?;
            report(game, outcome);
            run_ai_turns(game)?;
        }
    }
    Ok(Command::Continue)
}

/// Accepts `e2e4` / `e7e8q` or `fr fc tr tc [piece]`.
fn parse_move(line: &str, state: &GameState) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() == 1 {
        let mv = long_algebraic_to_move(words[0], state)?;
        return Ok((mv.from, mv.to, mv.promotion));
    }
    if words.len() != 4 && words.len() != 5 {
        return Err(ChessError::InvalidNotation(line.to_owned()));
    }

    let mut coords = [0i32; 4];
    for (slot, word) in coords.iter_mut().zip(&words) {
        *slot = word
            .parse()
            .map_err(|_| ChessError::InvalidNotation(line.to_owned()))?;
    }
    let promotion = match words.get(4) {
        Some(word) => Some(
            word.chars()
                .next()
                .and_then(PieceKind::from_char)
                .ok_or_else(|| ChessError::InvalidNotation(line.to_owned()))?,
        ),
        None => None,
    };
    Ok((
        Square::new(coords[0], coords[1])?,
        Square::new(coords[2], coords[3])?,
        promotion,
    ))
}

fn run_ai_turns(game: &mut Game) -> ChessResult<()> {
    while game.is_ai_turn() {
        match game.play_ai_move()? {
            Some(outcome) => report(game, outcome),
            None => break,
        }
    }
    Ok(())
}

fn report(game: &Game, outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::PromotionPending(square) => {
            println!("promotion on {square}: choose q, r, b or n");
        }
        MoveOutcome::Played { mv, status } => {
            println!("{}", render_game_state(game.state()));
            let notation = game
                .history()
                .last()
                .map_or_else(|| move_to_long_algebraic(&mv), |record| record.notation.clone());
            println!("played {notation}");
            match status {
                GameStatus::Ongoing => {}
                GameStatus::Checkmate => match game.winner() {
                    Some(winner) => println!("checkmate, {winner} wins"),
                    None => println!("checkmate"),
                },
                GameStatus::Stalemate => println!("stalemate"),
            }
        }
    }
}
