//! Turn sequencing for a game against the minimax opponent.
//!
//! The controller is a five-state machine advanced one input event at a
//! time. Transitions are a `match` over `(state, event)`; after every mark
//! the board outcome is resolved once, with a completed line taking
//! precedence over a full board.

use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::evaluator::evaluate;
use crate::types::{Mark, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Cell the opponent takes when it wins the opening coin flip.
pub const OPENING_CELL: usize = 0;

/// Active state of the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameState {
    /// Waiting for the first update to decide the opening.
    StartGame,
    /// Waiting for the player to pick an empty cell.
    PlayerTurn,
    /// The opponent moves on the next update.
    OpponentTurn,
    /// A line was completed.
    Winner,
    /// The board filled up without a completed line.
    Draw,
}

impl GameState {
    /// Returns true for `Winner` and `Draw`.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Winner | GameState::Draw)
    }
}

/// Input delivered to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// A tick or any event the game does not react to.
    Idle,
    /// Pointer released over a cell, or `None` when it missed the board.
    PointerReleased(Option<usize>),
}

/// Notification emitted on every update once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// A side completed a line.
    Winner(Mark),
    /// The game ended without a winner.
    Draw,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Winner(Mark::Player) => write!(f, "You win!"),
            Notice::Winner(_) => write!(f, "The computer wins!"),
            Notice::Draw => write!(f, "Draw!"),
        }
    }
}

/// Drives one game between the player and the minimax opponent.
#[derive(Debug, Clone)]
pub struct GameController<R = StdRng> {
    board: Board,
    state: GameState,
    rng: R,
}

impl GameController<StdRng> {
    /// Creates a controller seeded from system entropy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a controller whose opening coin flips are reproducible.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameController<R> {
    /// Creates a controller drawing the opening coin flip from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            board: Board::new(),
            state: GameState::StartGame,
            rng,
        }
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the active state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the outcome derived from the board.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Discards the board and starts a new game.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn reset(&mut self) {
        info!("Starting a new game");
        self.board = Board::new();
        self.state = GameState::StartGame;
    }

    /// Advances the game by one input event.
    ///
    /// Returns the terminal notice once the game is over, `None` while it
    /// is still being played.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn update(&mut self, event: &InputEvent) -> Result<Option<Notice>, GameError> {
        match (self.state, event) {
            (GameState::StartGame, _) => self.open()?,
            (GameState::PlayerTurn, InputEvent::PointerReleased(cell)) => {
                self.player_move(*cell)?
            }
            (GameState::PlayerTurn, InputEvent::Idle) => {}
            (GameState::OpponentTurn, _) => self.opponent_move()?,
            (GameState::Winner, _) => {
                let winner = self.board.check_win_condition().ok_or_else(|| {
                    GameError::new(GameErrorKind::IllegalState(
                        "winner state without a completed line".to_string(),
                    ))
                })?;
                debug!(%winner, "Winner");
                return Ok(Some(Notice::Winner(winner)));
            }
            (GameState::Draw, _) => {
                debug!("Draw");
                return Ok(Some(Notice::Draw));
            }
        }
        Ok(None)
    }

    /// Coin flip: half the time the opponent opens in the corner.
    fn open(&mut self) -> Result<(), GameError> {
        let opponent_first = self.rng.gen_bool(0.5);
        if opponent_first {
            self.board.insert_mark(Mark::Opponent, OPENING_CELL)?;
        }
        info!(opponent_first, "Game started");
        self.state = GameState::PlayerTurn;
        Ok(())
    }

    fn player_move(&mut self, cell: Option<usize>) -> Result<(), GameError> {
        let mut next = GameState::PlayerTurn;
        match cell {
            Some(index) if self.board.mark_at(index).is_ok_and(Mark::is_empty) => {
                self.board.insert_mark(Mark::Player, index)?;
                info!(index, "Player moved");
                next = GameState::OpponentTurn;
            }
            Some(index) => debug!(index, "Ignoring release on unavailable cell"),
            None => debug!("Ignoring release outside the board"),
        }
        self.state = self.resolve(next);
        Ok(())
    }

    fn opponent_move(&mut self) -> Result<(), GameError> {
        let evaluation = evaluate(&self.board, false);
        let index = evaluation.best_move.ok_or_else(|| {
            GameError::new(GameErrorKind::IllegalState(format!(
                "no opponent move on board\n{}",
                self.board
            )))
        })?;
        self.board.insert_mark(Mark::Opponent, index)?;
        info!(index, score = evaluation.score, "Opponent moved");
        self.state = self.resolve(GameState::PlayerTurn);
        Ok(())
    }

    /// Routes to `Winner` or `Draw` when the board is decided, else `next`.
    fn resolve(&self, next: GameState) -> GameState {
        let resolved = match self.board.outcome() {
            Outcome::PlayerWins | Outcome::OpponentWins => GameState::Winner,
            Outcome::Draw => GameState::Draw,
            Outcome::InProgress => next,
        };
        if resolved.is_terminal() {
            info!(outcome = %self.board.outcome(), board = %self.board, "Game over");
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Mark = Mark::Player;
    const O: Mark = Mark::Opponent;
    const E: Mark = Mark::Empty;

    fn at(board: Board, state: GameState) -> GameController {
        GameController {
            board,
            state,
            rng: StdRng::seed_from_u64(7),
        }
    }

    #[test]
    fn test_start_always_reaches_player_turn() {
        for seed in 0..32 {
            let mut game = GameController::seeded(seed);
            assert_eq!(game.update(&InputEvent::Idle).unwrap(), None);
            assert_eq!(game.state(), GameState::PlayerTurn);
            let marked = game.board().marked_count();
            assert!(marked <= 1);
            if marked == 1 {
                assert_eq!(game.board().mark_at(OPENING_CELL).unwrap(), Mark::Opponent);
            }
        }
    }

    #[test]
    fn test_idle_does_not_move_player() {
        let mut game = at(Board::new(), GameState::PlayerTurn);
        game.update(&InputEvent::Idle).unwrap();
        assert_eq!(game.state(), GameState::PlayerTurn);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_win_beats_draw_on_full_board() {
        // Player fills the last cell and completes the bottom row.
        let board = Board::from_marks([O, P, O, O, P, O, P, E, P]);
        let mut game = at(board, GameState::PlayerTurn);
        game.update(&InputEvent::PointerReleased(Some(7))).unwrap();
        assert!(game.board().is_full());
        assert_eq!(game.state(), GameState::Winner);
        assert_eq!(
            game.update(&InputEvent::Idle).unwrap(),
            Some(Notice::Winner(Mark::Player))
        );
    }

    #[test]
    fn test_player_fills_board_without_line_is_draw() {
        let mut game = at(Board::from_marks([P, O, P, P, O, O, O, P, E]), GameState::PlayerTurn);
        assert_eq!(game.update(&InputEvent::PointerReleased(Some(8))).unwrap(), None);
        assert!(game.board().is_full());
        assert_eq!(game.state(), GameState::Draw);

        let board = *game.board();
        for event in [InputEvent::Idle, InputEvent::PointerReleased(Some(8))] {
            assert_eq!(game.update(&event).unwrap(), Some(Notice::Draw));
            assert_eq!(game.state(), GameState::Draw);
            assert_eq!(game.board(), &board);
        }
    }

    #[test]
    fn test_opponent_fills_board_without_line_is_draw() {
        let mut game = at(Board::from_marks([P, O, P, P, O, O, O, P, E]), GameState::OpponentTurn);
        assert_eq!(game.update(&InputEvent::Idle).unwrap(), None);
        assert_eq!(game.board().mark_at(8).unwrap(), Mark::Opponent);
        assert_eq!(game.state(), GameState::Draw);
        assert_eq!(game.outcome(), Outcome::Draw);
        assert_eq!(game.update(&InputEvent::Idle).unwrap(), Some(Notice::Draw));
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut game = at(Board::from_marks([P, P, P, O, O, E, E, E, E]), GameState::Winner);
        game.reset();
        assert_eq!(game.state(), GameState::StartGame);
        assert_eq!(game.board(), &Board::new());
    }
}
