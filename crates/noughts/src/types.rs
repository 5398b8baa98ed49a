//! Core domain types for noughts.

use serde::{Deserialize, Serialize};

/// Contents of a board cell.
///
/// The player draws noughts, the computer opponent draws crosses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// The human player's mark (maximizing side).
    Player,
    /// The computer opponent's mark (minimizing side).
    Opponent,
}

impl Mark {
    /// Returns the other side's mark. `Empty` has no opponent.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Returns true for `Empty`.
    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }

    /// Single-character symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::Player => 'O',
            Mark::Opponent => 'X',
        }
    }
}

/// Outcome of a game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Outcome {
    /// No winner yet and empty cells remain.
    InProgress,
    /// The player completed a line.
    PlayerWins,
    /// The opponent completed a line.
    OpponentWins,
    /// Board full without a completed line.
    Draw,
}

impl Outcome {
    /// Returns true unless the game is still in progress.
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWins => Some(Mark::Player),
            Outcome::OpponentWins => Some(Mark::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}
