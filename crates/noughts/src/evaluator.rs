//! Exhaustive minimax search.
//!
//! The player is the maximizing side and the opponent the minimizing side.
//! Scores are `+1` for a player win, `-1` for an opponent win and `0` for
//! a draw. Every continuation is searched: the 3x3 tree is small enough
//! that neither pruning nor a transposition table is needed.

use crate::board::Board;
use crate::types::Mark;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of a search: the value of the position and the move achieving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Evaluation {
    /// Signed value of the position under optimal play.
    pub score: i8,
    /// Best cell for the side to move. `None` for terminal positions.
    pub best_move: Option<usize>,
}

/// Searches every continuation of `board` for the side to move.
///
/// `maximizing` selects the player (placing `Mark::Player`); otherwise the
/// opponent moves (placing `Mark::Opponent`). Among equally scored moves
/// the lowest cell index wins.
#[instrument(skip(board), fields(marked = board.marked_count()))]
pub fn evaluate(board: &Board, maximizing: bool) -> Evaluation {
    let mut visited = 0u64;
    let evaluation = search(board, maximizing, &mut visited);
    debug!(
        score = evaluation.score,
        best_move = ?evaluation.best_move,
        visited,
        "Search complete"
    );
    evaluation
}

fn search(board: &Board, maximizing: bool, visited: &mut u64) -> Evaluation {
    *visited += 1;

    match board.check_win_condition() {
        Some(Mark::Player) => return Evaluation::new(1, None),
        Some(Mark::Opponent) => return Evaluation::new(-1, None),
        _ => {}
    }

    let empty_spaces = board.get_empty_spaces();
    if empty_spaces.is_empty() {
        return Evaluation::new(0, None);
    }

    let mark = if maximizing { Mark::Player } else { Mark::Opponent };
    let mut best = Evaluation::new(if maximizing { i8::MIN } else { i8::MAX }, None);

    for space in empty_spaces {
        let child = board.with_mark(space, mark);
        let score = search(&child, !maximizing, visited).score;

        let improves = if maximizing {
            score > best.score
        } else {
            score < best.score
        };
        if improves {
            best = Evaluation::new(score, Some(space));
        }
    }

    best
}
