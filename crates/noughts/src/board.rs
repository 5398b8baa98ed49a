//! The 3x3 board and its win/draw rules.

use crate::error::{GameError, GameErrorKind};
use crate::types::{Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The 8 winning triples, scanned in this order.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 board, cells in row-major order (`index = row * 3 + col`).
///
/// Cheap to copy, so hypothetical moves are played on copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Mark; CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from raw cell contents.
    pub fn from_marks(cells: [Mark; CELLS]) -> Self {
        Self { cells }
    }

    /// Returns all cells.
    pub fn marks(&self) -> &[Mark; CELLS] {
        &self.cells
    }

    /// Returns the mark at a cell.
    pub fn mark_at(&self, index: usize) -> Result<Mark, GameError> {
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| GameError::new(GameErrorKind::IndexOutOfRange(index)))
    }

    /// Places a mark on an empty cell.
    ///
    /// Occupied cells are never overwritten and `Mark::Empty` is never
    /// inserted; both fail with `InvalidMove` and leave the board unchanged.
    #[instrument(skip(self))]
    pub fn insert_mark(&mut self, mark: Mark, index: usize) -> Result<(), GameError> {
        let current = self.mark_at(index)?;
        if mark.is_empty() || !current.is_empty() {
            return Err(GameError::new(GameErrorKind::InvalidMove(index)));
        }
        self.cells[index] = mark;
        trace!(%mark, index, "Mark inserted");
        Ok(())
    }

    /// Returns the indices of empty cells in ascending order.
    pub fn get_empty_spaces(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns the mark of the first completed line, if any.
    pub fn check_win_condition(&self) -> Option<Mark> {
        WIN_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a];
            (!mark.is_empty() && mark == self.cells[b] && mark == self.cells[c]).then_some(mark)
        })
    }

    /// Returns a copy with `mark` at `index`, without the occupancy checks.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut next = *self;
        next.cells[index] = mark;
        next
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|mark| !mark.is_empty())
    }

    /// No winner and no empty cell.
    pub fn is_draw(&self) -> bool {
        self.check_win_condition().is_none() && self.is_full()
    }

    /// Number of occupied cells.
    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|mark| !mark.is_empty()).count()
    }

    /// Derives the game outcome. A completed line wins even on a full board.
    pub fn outcome(&self) -> Outcome {
        match self.check_win_condition() {
            Some(Mark::Player) => Outcome::PlayerWins,
            Some(Mark::Opponent) => Outcome::OpponentWins,
            _ if self.is_full() => Outcome::Draw,
            _ => Outcome::InProgress,
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Mark::Empty => write!(f, "{}", index + 1)?,
                    mark => write!(f, "{}", mark.symbol())?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Mark = Mark::Player;
    const O: Mark = Mark::Opponent;
    const E: Mark = Mark::Empty;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(Board::new().check_win_condition(), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_marks([P, P, P, O, O, E, E, E, E]);
        assert_eq!(board.check_win_condition(), Some(Mark::Player));
        assert_eq!(board.outcome(), Outcome::PlayerWins);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_marks([P, P, O, E, O, E, O, P, E]);
        assert_eq!(board.check_win_condition(), Some(Mark::Opponent));
    }

    #[test]
    fn test_insert_rejects_occupied() {
        let mut board = Board::new();
        board.insert_mark(Mark::Player, 4).unwrap();
        let err = board.insert_mark(Mark::Opponent, 4).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::InvalidMove(4));
        assert_eq!(board.mark_at(4).unwrap(), Mark::Player);
    }

    #[test]
    fn test_insert_rejects_empty_mark() {
        let mut board = Board::new();
        let err = board.insert_mark(Mark::Empty, 0).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::InvalidMove(0));
    }

    #[test]
    fn test_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.mark_at(9).unwrap_err().kind(),
            &GameErrorKind::IndexOutOfRange(9)
        );
        assert_eq!(
            board.insert_mark(Mark::Player, 12).unwrap_err().kind(),
            &GameErrorKind::IndexOutOfRange(12)
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display() {
        let board = Board::from_marks([P, E, E, E, O, E, E, E, E]);
        assert_eq!(board.to_string(), "O|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }
}
